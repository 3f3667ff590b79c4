//! Station feed retrieval and parsing.
//!
//! This crate owns everything between the wire and a typed feed tree: the
//! HTTP transport ([`source`]), the XML parser and query-time extraction
//! ([`feed`]), and the bounded fetch-parse retry cycle ([`client`]).
//! Consumers downstream (catalog reconciliation, snapshot recording) only
//! ever see a structurally valid [`feed::FeedTree`] plus the feed's own
//! query timestamp, never a partial parse.

pub mod client;
pub mod errors;
pub mod feed;
pub mod login;
pub mod source;

pub use client::FeedClient;
pub use errors::{FeedError, FetchError, ParseError};
pub use feed::FeedTree;
