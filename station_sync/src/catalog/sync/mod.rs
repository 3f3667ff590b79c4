//! Catalog reconciliation against a fetched feed tree.
//!
//! ## What this does
//! - Walks the tree domain → city → place and inserts every entity the
//!   catalog has not seen yet. Entities get an existence check first and are
//!   **never updated** once present; if upstream attributes drift, the
//!   stored copy goes stale.
//! - Inserts hierarchy edges (domain↔city, city↔place) with
//!   insert-or-ignore semantics. Edges are cheaper than a check-then-insert
//!   and are not reported as changes; that asymmetry is what keeps the
//!   change summary an accurate list of newly seen entities.
//!
//! ## Transactions & consistency
//! The whole pass runs inside a single **`BEGIN IMMEDIATE`** transaction via
//! `SqliteConnection::immediate_transaction`. Sub-steps are ordered so every
//! edge insertion follows the insertion of both entities it references; the
//! transaction means a crash mid-pass leaves the catalog untouched instead
//! of partially updated.

mod changes;

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

pub use changes::{ChangeEntry, ChangeSummary, EntityKind};

use feed_ingestor::{FeedClient, FeedTree};

use crate::catalog::repo;
use crate::models::catalog::{NewCity, NewDomain, NewPlace};

/// Reconcile the catalog with `tree`, inserting unseen entities and edges.
///
/// Returns the entity insertions performed, in order. Running the same tree
/// twice leaves the catalog unchanged and yields an empty summary.
pub fn reconcile(conn: &mut SqliteConnection, tree: &FeedTree) -> anyhow::Result<ChangeSummary> {
    conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
        let mut summary = ChangeSummary::default();

        for d in tree.domains() {
            if !repo::domain_exists(conn, &d.code)? {
                repo::insert_domain(conn, &NewDomain::from(d))?;
                info!(domain = %d.code, name = %d.name, "new insert to domain");
                summary.push(EntityKind::Domain, d.code.as_str(), Some(d.name.as_str()));
            }
        }

        for (_, c) in tree.cities() {
            if !repo::city_exists(conn, c.uid)? {
                repo::insert_city(conn, &NewCity::from(c))?;
                info!(city = c.uid, name = c.name.as_deref().unwrap_or(""), "new insert to city");
                summary.push(EntityKind::City, c.uid.to_string(), c.name.as_deref());
            }
        }

        for (d, c) in tree.cities() {
            repo::link_domain_city(conn, &d.code, c.uid)?;
        }

        for p in tree.places() {
            let rec = p.place;
            if !repo::place_exists(conn, rec.uid)? {
                repo::insert_place(conn, &NewPlace::from(rec))?;
                info!(place = rec.uid, name = rec.name.as_deref().unwrap_or(""), "new insert to place");
                summary.push(EntityKind::Place, rec.uid.to_string(), rec.name.as_deref());
            }
        }

        for p in tree.places() {
            repo::link_city_place(conn, p.place.uid, p.city.uid)?;
        }

        Ok(summary)
    })
}

/// Bootstrap the catalog when it is empty.
///
/// If the place table holds no rows, fetch the current feed through the
/// retry-capable `client` and reconcile it; otherwise do nothing. Returns
/// the bootstrap's change summary when a fetch happened.
pub fn fill_if_empty(
    conn: &mut SqliteConnection,
    client: &FeedClient,
) -> anyhow::Result<Option<ChangeSummary>> {
    if !repo::place_table_empty(conn)? {
        return Ok(None);
    }

    info!("catalog is empty, bootstrapping from the live feed");
    let (tree, _query_time) = client.fetch_and_parse()?;
    let summary = reconcile(conn, &tree)?;
    Ok(Some(summary))
}
