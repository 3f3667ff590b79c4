mod common;
use common::{seed_catalog, setup_db};

use std::collections::BTreeSet;

use station_sync::places::{PlaceSelection, resolve};

fn ids(set: &BTreeSet<i32>) -> Vec<i32> {
    set.iter().copied().collect()
}

#[test]
fn overlapping_groups_resolve_without_duplicates() {
    let (_db, mut conn) = setup_db();
    seed_catalog(&mut conn);

    // "de" already covers every place; the city and place entries overlap it.
    let sel = PlaceSelection {
        domains: vec!["de".into()],
        cities: vec![14],
        places: vec![5],
    };
    let set = resolve(&mut conn, &sel).expect("resolve");
    assert_eq!(ids(&set), vec![5, 6, 7]);
}

#[test]
fn unknown_ids_are_skipped_silently() {
    let (_db, mut conn) = setup_db();
    seed_catalog(&mut conn);

    let sel = PlaceSelection {
        domains: vec!["zz".into()],
        cities: vec![14, 999],
        places: vec![404],
    };
    let set = resolve(&mut conn, &sel).expect("resolve must not error");
    assert_eq!(ids(&set), vec![5, 6]);
}

#[test]
fn city_group_expands_through_edges() {
    let (_db, mut conn) = setup_db();
    seed_catalog(&mut conn);

    let sel = PlaceSelection {
        cities: vec![22],
        ..Default::default()
    };
    assert_eq!(ids(&resolve(&mut conn, &sel).unwrap()), vec![7]);
}

#[test]
fn explicit_places_pass_through() {
    let (_db, mut conn) = setup_db();
    seed_catalog(&mut conn);

    let sel = PlaceSelection {
        places: vec![7, 5],
        ..Default::default()
    };
    assert_eq!(ids(&resolve(&mut conn, &sel).unwrap()), vec![5, 7]);
}

#[test]
fn empty_selection_resolves_to_nothing() {
    let (_db, mut conn) = setup_db();
    seed_catalog(&mut conn);

    let set = resolve(&mut conn, &PlaceSelection::default()).unwrap();
    assert!(set.is_empty());
}
