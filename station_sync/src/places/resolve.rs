use std::collections::BTreeSet;

use diesel::SqliteConnection;
use tracing::debug;

use crate::catalog::repo;
use crate::places::config::PlaceSelection;

/// Expand a selection into a deduplicated set of place ids.
///
/// Domain codes expand through the domain↔city edges, then each city
/// through the city↔place edges; city ids expand directly; place ids are
/// taken as-is. Any id that fails its existence check (a stale or mistyped
/// configuration entry) is skipped silently rather than aborting the run.
pub fn resolve(
    conn: &mut SqliteConnection,
    selection: &PlaceSelection,
) -> anyhow::Result<BTreeSet<i32>> {
    let mut out = BTreeSet::new();

    for code in &selection.domains {
        if !repo::domain_exists(conn, code)? {
            debug!(domain = %code, "unknown domain in selection, skipping");
            continue;
        }
        for city_id in repo::cities_of_domain(conn, code)? {
            out.extend(repo::places_of_city(conn, city_id)?);
        }
    }

    for &city_id in &selection.cities {
        if !repo::city_exists(conn, city_id)? {
            debug!(city = city_id, "unknown city in selection, skipping");
            continue;
        }
        out.extend(repo::places_of_city(conn, city_id)?);
    }

    for &place_id in &selection.places {
        if !repo::place_exists(conn, place_id)? {
            debug!(place = place_id, "unknown place in selection, skipping");
            continue;
        }
        out.insert(place_id);
    }

    Ok(out)
}
