//! Crate-level documentation for the station_sync library.

#![deny(missing_docs)]

pub mod catalog;
pub mod config;
pub mod db;
pub mod models;
pub mod notify;
pub mod places;
/// Diesel table definitions for the master catalog and the snapshot store.
pub mod schema;
pub mod snapshot;
pub mod tz;
