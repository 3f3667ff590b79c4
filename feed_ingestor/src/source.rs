//! Transport seam for feed retrieval.
//!
//! [`FeedSource`] abstracts "give me the raw feed text" so the retry cycle
//! in [`crate::client`] can be driven against the real HTTP transport or a
//! test double. The one shipped implementation is [`HttpSource`], a blocking
//! reqwest client with an explicit request timeout.

use std::time::Duration;

use crate::errors::FetchError;

/// Default request timeout for the HTTP transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Anything that can produce one raw feed document.
pub trait FeedSource {
    /// Retrieve the current feed text. One call is one attempt; retrying is
    /// the caller's business.
    fn fetch(&self) -> Result<String, FetchError>;
}

/// Blocking HTTP transport for a fixed feed URL.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpSource {
    /// Build a transport for `url` with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The URL this source fetches from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FeedSource for HttpSource {
    fn fetch(&self) -> Result<String, FetchError> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }
        Ok(response.text()?)
    }
}
