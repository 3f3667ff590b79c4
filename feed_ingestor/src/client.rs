//! The bounded fetch-parse retry cycle.
//!
//! A feed attempt is fetch → parse XML → extract query time; any failure
//! along the way consumes one attempt out of a shared budget and triggers a
//! fresh fetch. Transient failures never escape this module: callers see
//! either a valid `(tree, query_time)` pair or [`FeedError::Exhausted`].

use std::time::Duration;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::errors::FeedError;
use crate::feed::{self, FeedTree};
use crate::source::FeedSource;

/// Total attempts shared between transport and parse failures.
pub const MAX_ATTEMPTS: u32 = 10;

/// Delay schedule between attempts: exponential from `base_delay`, capped at
/// `max_delay`. The baseline schedule is [`BackoffPolicy::none`], an
/// immediate re-fetch.
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    /// Delay before the first retry; doubles per subsequent retry.
    pub base_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl BackoffPolicy {
    /// No delay between attempts.
    pub fn none() -> Self {
        Self {
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay to sleep before retry number `retry_index` (0-based).
    pub fn delay_for_retry(&self, retry_index: u32) -> Duration {
        let factor = 1u32.checked_shl(retry_index).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Retry-capable feed accessor over an arbitrary [`FeedSource`].
pub struct FeedClient {
    source: Box<dyn FeedSource>,
    max_attempts: u32,
    backoff: BackoffPolicy,
}

impl FeedClient {
    /// Wrap a source with the default attempt budget and no backoff.
    pub fn new(source: Box<dyn FeedSource>) -> Self {
        Self {
            source,
            max_attempts: MAX_ATTEMPTS,
            backoff: BackoffPolicy::none(),
        }
    }

    /// Replace the delay schedule between attempts.
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Fetch and parse the feed, retrying until the shared budget runs out.
    ///
    /// On success the returned tree is structurally valid and the query time
    /// was parsed from the feed's trailing comment; partial results are never
    /// returned. Transport and parse failures are logged and retried alike;
    /// once `MAX_ATTEMPTS` attempts are spent the terminal
    /// [`FeedError::Exhausted`] is raised.
    pub fn fetch_and_parse(&self) -> Result<(FeedTree, NaiveDateTime), FeedError> {
        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                let delay = self.backoff.delay_for_retry(attempt - 2);
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
            }

            let raw = match self.source.fetch() {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(attempt, error = %err, "feed fetch failed, retrying");
                    continue;
                }
            };

            let tree = match feed::parse_feed(&raw) {
                Ok(tree) => tree,
                Err(err) => {
                    warn!(attempt, error = %err, "feed parse failed, refetching");
                    continue;
                }
            };

            match feed::extract_query_time(&raw) {
                Ok(query_time) => return Ok((tree, query_time)),
                Err(err) => {
                    warn!(attempt, error = %err, "query time extraction failed, refetching");
                    continue;
                }
            }
        }

        Err(FeedError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}
