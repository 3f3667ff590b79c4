//! URL lookup seam.

use thiserror::Error;

/// Purpose name under which the station feed URL is registered.
pub const STATION_LIST: &str = "StationList";

/// A lookup failure is fatal to the run; there is no retry at this layer.
#[derive(Debug, Error)]
pub enum LoginError {
    /// No URL is registered for the requested purpose.
    #[error("no URL configured for purpose `{0}`")]
    MissingUrl(String),
}

/// Resolves a named purpose (e.g. [`STATION_LIST`]) to a concrete URL.
///
/// Implementations live with whoever owns the credential/URL storage; this
/// crate only consumes the lookup.
pub trait LoginProvider {
    /// Return the URL registered for `purpose`.
    fn url(&self, purpose: &str) -> Result<String, LoginError>;
}
