//! Row-level catalog operations: existence checks, inserts, edge lookups.

use std::collections::BTreeSet;

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::{RunQueryDsl, SqliteConnection, insert_into, select};

use crate::models::catalog::{NewCity, NewCityPlace, NewDomain, NewDomainCity, NewPlace};
use crate::schema::{city, city_place, domain, domain_city, place};

/// True if a domain with this code is already in the catalog.
pub fn domain_exists(conn: &mut SqliteConnection, code: &str) -> anyhow::Result<bool> {
    let found = select(exists(domain::table.filter(domain::code.eq(code)))).get_result(conn)?;
    Ok(found)
}

/// True if a city with this id is already in the catalog.
pub fn city_exists(conn: &mut SqliteConnection, id: i32) -> anyhow::Result<bool> {
    let found = select(exists(city::table.filter(city::id.eq(id)))).get_result(conn)?;
    Ok(found)
}

/// True if a place with this id is already in the catalog.
pub fn place_exists(conn: &mut SqliteConnection, id: i32) -> anyhow::Result<bool> {
    let found = select(exists(place::table.filter(place::id.eq(id)))).get_result(conn)?;
    Ok(found)
}

/// True if the catalog holds no places yet.
pub fn place_table_empty(conn: &mut SqliteConnection) -> anyhow::Result<bool> {
    let n: i64 = place::table.count().get_result(conn)?;
    Ok(n == 0)
}

/// Insert a new domain row. The caller has already checked absence.
pub fn insert_domain(conn: &mut SqliteConnection, row: &NewDomain<'_>) -> anyhow::Result<usize> {
    let n = insert_into(domain::table).values(row).execute(conn)?;
    Ok(n)
}

/// Insert a new city row. The caller has already checked absence.
pub fn insert_city(conn: &mut SqliteConnection, row: &NewCity<'_>) -> anyhow::Result<usize> {
    let n = insert_into(city::table).values(row).execute(conn)?;
    Ok(n)
}

/// Insert a new place row. The caller has already checked absence.
pub fn insert_place(conn: &mut SqliteConnection, row: &NewPlace<'_>) -> anyhow::Result<usize> {
    let n = insert_into(place::table).values(row).execute(conn)?;
    Ok(n)
}

/// domain <--> city link, ignored if the pair already exists.
pub fn link_domain_city(
    conn: &mut SqliteConnection,
    domain_code: &str,
    city_id: i32,
) -> anyhow::Result<usize> {
    let row = NewDomainCity {
        domain_code,
        city_id,
    };
    let n = insert_into(domain_city::table)
        .values(&row)
        .on_conflict((domain_city::domain_code, domain_city::city_id))
        .do_nothing()
        .execute(conn)?;
    Ok(n)
}

/// city <--> place link, ignored if the pair already exists.
pub fn link_city_place(
    conn: &mut SqliteConnection,
    place_id: i32,
    city_id: i32,
) -> anyhow::Result<usize> {
    let row = NewCityPlace { place_id, city_id };
    let n = insert_into(city_place::table)
        .values(&row)
        .on_conflict((city_place::place_id, city_place::city_id))
        .do_nothing()
        .execute(conn)?;
    Ok(n)
}

/// All city ids linked to a domain. Order is irrelevant to callers.
pub fn cities_of_domain(
    conn: &mut SqliteConnection,
    domain_code: &str,
) -> anyhow::Result<BTreeSet<i32>> {
    let ids = domain_city::table
        .filter(domain_city::domain_code.eq(domain_code))
        .select(domain_city::city_id)
        .load::<i32>(conn)?
        .into_iter()
        .collect();
    Ok(ids)
}

/// All place ids linked to a city. Order is irrelevant to callers.
pub fn places_of_city(conn: &mut SqliteConnection, city_id: i32) -> anyhow::Result<BTreeSet<i32>> {
    let ids = city_place::table
        .filter(city_place::city_id.eq(city_id))
        .select(city_place::place_id)
        .load::<i32>(conn)?
        .into_iter()
        .collect();
    Ok(ids)
}
