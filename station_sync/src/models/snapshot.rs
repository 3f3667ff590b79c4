//! Models for the append-only occupancy fact table.

use diesel::prelude::*;

/// One occupancy reading in [`crate::schema::place_fill`].
///
/// Rows are immutable; re-recording the same (place, timestamp) pair is a
/// no-op at the store layer.
#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = crate::schema::place_fill)]
pub struct Fill {
    /// Snapshot time in epoch seconds, from the feed's query-time comment.
    pub recorded_at: i64,
    /// Place the reading belongs to.
    pub place_id: i32,
    /// Bikes present at the place at `recorded_at`.
    pub bikes: i32,
}

/// Insertable form of [`Fill`].
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = crate::schema::place_fill)]
pub struct NewFill {
    /// Snapshot time in epoch seconds.
    pub recorded_at: i64,
    /// Place the reading belongs to.
    pub place_id: i32,
    /// Bikes present at the place.
    pub bikes: i32,
}
