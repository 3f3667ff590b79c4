//! Append-only occupancy snapshots.
//!
//! One snapshot row is (timestamp, place, bikes). Insertion is
//! insert-or-ignore keyed on (place_id, recorded_at): re-recording the same
//! feed state for the same timestamp is a no-op, which makes every entry
//! point here safe to re-run. Rows are never updated or deleted.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use diesel::prelude::*;
use diesel::{SqliteConnection, insert_into};
use tracing::debug;

use feed_ingestor::feed::{self, FeedTree};
use feed_ingestor::FeedClient;

use crate::models::snapshot::NewFill;
use crate::schema::place_fill;
use crate::tz::local_to_epoch;

/// Layout of the timestamp tail in saved feed file names.
const FILE_TIME_FORMAT: &str = "%Y-%m-%d-%Hh%Mm";
const FILE_TIME_LEN: usize = 17;

/// Record one occupancy reading per place in `tree` at `recorded_at`.
///
/// With a non-empty `filter`, only places whose id is a member are recorded;
/// `None` or an empty set means every place. Places without a readable bike
/// count are skipped. Returns the number of rows actually inserted;
/// already-present (place, timestamp) pairs count as zero.
pub fn record(
    conn: &mut SqliteConnection,
    tree: &FeedTree,
    recorded_at: i64,
    filter: Option<&BTreeSet<i32>>,
) -> anyhow::Result<usize> {
    let restrict = filter.filter(|set| !set.is_empty());

    conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
        let mut inserted = 0usize;

        for ctx in tree.places() {
            let rec = ctx.place;
            if let Some(keep) = restrict {
                if !keep.contains(&rec.uid) {
                    continue;
                }
            }
            let Some(bikes) = rec.bikes else {
                debug!(place = rec.uid, "no readable bike count, skipping");
                continue;
            };

            let row = NewFill {
                recorded_at,
                place_id: rec.uid,
                bikes,
            };
            inserted += insert_into(place_fill::table)
                .values(&row)
                .on_conflict((place_fill::place_id, place_fill::recorded_at))
                .do_nothing()
                .execute(conn)?;
        }

        Ok(inserted)
    })
}

/// Fetch the current feed state and record it.
///
/// Goes through the retry-capable `client`, converts the feed's wall-clock
/// query time to epoch seconds in `tz`, then delegates to [`record`].
pub fn add_current_state(
    conn: &mut SqliteConnection,
    client: &FeedClient,
    tz: Tz,
    filter: Option<&BTreeSet<i32>>,
) -> anyhow::Result<usize> {
    let (tree, query_time) = client.fetch_and_parse()?;
    let recorded_at = local_to_epoch(query_time, tz)?;
    record(conn, &tree, recorded_at, filter)
}

/// Import one previously saved feed file into the snapshot table.
///
/// The file is parsed single-shot (there is nothing to re-fetch) and the
/// snapshot time comes from the filename tail `YYYY-MM-DD-HHhMMm`, where a
/// blank stands in for a missing leading zero.
pub fn import_file(
    conn: &mut SqliteConnection,
    path: &Path,
    tz: Tz,
    filter: Option<&BTreeSet<i32>>,
) -> anyhow::Result<usize> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read feed file {}", path.display()))?;
    let tree = feed::parse_feed(&raw)
        .with_context(|| format!("parse feed file {}", path.display()))?;
    let naive = time_from_filename(path)?;
    let recorded_at = local_to_epoch(naive, tz)?;
    record(conn, &tree, recorded_at, filter)
}

/// Derive the snapshot time from a saved feed file name.
fn time_from_filename(path: &Path) -> anyhow::Result<NaiveDateTime> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("no usable file name in {}", path.display()))?;
    let tail = stem
        .len()
        .checked_sub(FILE_TIME_LEN)
        .and_then(|start| stem.get(start..))
        .with_context(|| format!("file name {stem:?} too short for a timestamp tail"))?;

    let cleaned = tail.replace(' ', "0");
    NaiveDateTime::parse_from_str(&cleaned, FILE_TIME_FORMAT)
        .with_context(|| format!("file name tail {tail:?} is not a timestamp"))
}
