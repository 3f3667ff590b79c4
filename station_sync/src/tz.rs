//! Time zone conversion for feed wall-clock times.
//!
//! The feed's query-time comment carries a naive local timestamp in the
//! feed's own time zone; snapshot rows store epoch seconds. Ambiguous local
//! times (DST fall-back) resolve to the earliest instant so the mapping
//! stays deterministic; nonexistent ones (spring-forward gap) are an error.

use anyhow::{Context, anyhow};
use chrono::{NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Parse an IANA time zone name (e.g. "Europe/Berlin").
pub fn parse_tz(name: &str) -> anyhow::Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| anyhow!("unknown time zone: {name}"))
}

/// Convert a naive feed timestamp to epoch seconds in the given zone.
pub fn local_to_epoch(naive: NaiveDateTime, tz: Tz) -> anyhow::Result<i64> {
    let instant = tz
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("local time {naive} does not exist in {tz}"))?;
    Ok(instant.timestamp())
}
