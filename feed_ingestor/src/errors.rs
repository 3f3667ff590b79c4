use thiserror::Error;

/// Transport-level failure while retrieving the feed document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request itself failed (connect error, timeout, bad TLS, ...).
    #[error("feed transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered, but not with a usable document.
    #[error("http status {status} for {url}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: u16,
        /// The URL that was requested.
        url: String,
    },
}

/// Failure to turn raw feed text into a tree plus query time.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not well-formed XML.
    #[error("malformed feed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// A required attribute is absent on an element.
    #[error("missing attribute `{attr}` on <{element}>")]
    MissingAttr {
        /// Tag name of the offending element.
        element: String,
        /// Name of the absent attribute.
        attr: String,
    },

    /// A required attribute is present but not interpretable.
    #[error("invalid value {value:?} for attribute `{attr}` on <{element}>")]
    InvalidAttr {
        /// Tag name of the offending element.
        element: String,
        /// Name of the attribute.
        attr: String,
        /// The raw attribute text.
        value: String,
    },

    /// No `<!-- ... -->` query-time comment was found in the document.
    #[error("query-time comment not found in feed text")]
    QueryTimeMissing,

    /// The comment was found but its timestamp did not match the fixed layout.
    #[error("could not parse query time {text:?}")]
    QueryTime {
        /// The substring that was extracted from the comment.
        text: String,
        /// Underlying chrono parse failure.
        #[source]
        source: chrono::ParseError,
    },
}

/// Unified error surface of the fetch-parse cycle.
///
/// `Fetch` and `Parse` only escape from the single-shot helpers; the
/// retry-capable [`crate::client::FeedClient::fetch_and_parse`] swallows both
/// and surfaces `Exhausted` once the shared attempt budget is spent.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport failure (single-shot path only).
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Parse failure (single-shot path only).
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The shared fetch-parse attempt budget ran out.
    #[error("could not fetch a parsable station feed after {attempts} attempts")]
    Exhausted {
        /// How many attempts were made before giving up.
        attempts: u32,
    },
}
