//! Database utilities for connections and schema migrations.
//!
//! This module provides:
//! - SQLite connection helpers: [`connection::connect_sqlite`] applies WAL,
//!   foreign_keys=ON, and a 5000ms busy_timeout.
//! - Embedded Diesel migrations and a runner: [`migrate::run_sqlite`], the
//!   idempotent "ensure schema" step every entry point runs before touching
//!   the store.
//!
//! The whole store lives in one SQLite file: the five catalog tables and the
//! snapshot fact table. One connection handle is opened by the coordinating
//! caller and passed down to reconciliation, resolution, and snapshot
//! recording; dropping it releases the store on every exit path.

pub mod connection;
pub mod migrate;
