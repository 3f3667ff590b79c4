//! Change notification seam.
//!
//! Reconciliation produces a human-readable change summary; whoever runs the
//! sync decides where a non-empty summary goes. Delivery transports (mail,
//! chat, ...) live outside this crate; the shipped implementation just puts
//! the summary on the log.

use tracing::info;

/// Receives the change summary of a reconciliation pass.
pub trait Notifier {
    /// Deliver one notification. `subject` is a short one-liner, `body` the
    /// rendered change summary.
    fn notify(&self, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// Notifier that writes to the tracing log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, subject: &str, body: &str) -> anyhow::Result<()> {
        info!(subject, "catalog changed:\n{body}");
        Ok(())
    }
}
