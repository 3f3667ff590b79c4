//! Catalog models for the master data tables.
//!
//! These types mirror the entity and edge tables of the master catalog:
//! - [`crate::schema::domain`] — top-level feed groupings (code, name, country, coordinates)
//! - [`crate::schema::city`] — cities within a domain
//! - [`crate::schema::place`] — individual stations
//! - [`crate::schema::domain_city`] / [`crate::schema::city_place`] — hierarchy edges
//!
//! Entity ids are assigned by the feed and immutable; rows are inserted once
//! and never updated afterwards, so there are no changeset types here. Edges
//! carry no identity beyond their unique pair.

use diesel::prelude::*;

use feed_ingestor::feed::{CityRecord, DomainRecord, PlaceRecord};

// ----------------------- domain -----------------------

/// A domain registry row in [`crate::schema::domain`].
#[derive(Debug, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::domain)]
#[diesel(primary_key(code))]
pub struct Domain {
    /// Short domain code (primary key), e.g. "de".
    pub code: String,
    /// Operator name.
    pub name: String,
    /// Country the domain operates in.
    pub country: String,
    /// Latitude of the domain's nominal center.
    pub latitude: Option<f64>,
    /// Longitude of the domain's nominal center.
    pub longitude: Option<f64>,
}

/// Insertable form of [`Domain`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::domain)]
pub struct NewDomain<'a> {
    /// Short domain code (primary key).
    pub code: &'a str,
    /// Operator name.
    pub name: &'a str,
    /// Country the domain operates in.
    pub country: &'a str,
    /// Latitude of the domain's nominal center.
    pub latitude: Option<f64>,
    /// Longitude of the domain's nominal center.
    pub longitude: Option<f64>,
}

impl<'a> From<&'a DomainRecord> for NewDomain<'a> {
    fn from(rec: &'a DomainRecord) -> Self {
        Self {
            code: &rec.code,
            name: &rec.name,
            country: &rec.country,
            latitude: rec.lat,
            longitude: rec.lng,
        }
    }
}

// ----------------------- city -----------------------

/// A city row in [`crate::schema::city`].
#[derive(Debug, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::city)]
pub struct City {
    /// Feed-assigned city id (primary key).
    pub id: i32,
    /// City name.
    pub name: Option<String>,
    /// Feed's place-count hint at insertion time.
    pub num_places: Option<i32>,
    /// Latitude of the city center.
    pub latitude: Option<f64>,
    /// Longitude of the city center.
    pub longitude: Option<f64>,
}

/// Insertable form of [`City`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::city)]
pub struct NewCity<'a> {
    /// Feed-assigned city id (primary key).
    pub id: i32,
    /// City name.
    pub name: Option<&'a str>,
    /// Feed's place-count hint.
    pub num_places: Option<i32>,
    /// Latitude of the city center.
    pub latitude: Option<f64>,
    /// Longitude of the city center.
    pub longitude: Option<f64>,
}

impl<'a> From<&'a CityRecord> for NewCity<'a> {
    fn from(rec: &'a CityRecord) -> Self {
        Self {
            id: rec.uid,
            name: rec.name.as_deref(),
            num_places: rec.num_places,
            latitude: rec.lat,
            longitude: rec.lng,
        }
    }
}

// ----------------------- place -----------------------

/// A station row in [`crate::schema::place`].
#[derive(Debug, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::place)]
pub struct Place {
    /// Feed-assigned place id (primary key).
    pub id: i32,
    /// Station number as printed on the terminal.
    pub number: Option<i32>,
    /// Whether this is a fixed spot.
    pub spot: Option<bool>,
    /// Station name.
    pub name: Option<String>,
    /// Station latitude.
    pub latitude: Option<f64>,
    /// Station longitude.
    pub longitude: Option<f64>,
    /// Terminal hardware type.
    pub terminal_type: Option<String>,
}

/// Insertable form of [`Place`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::place)]
pub struct NewPlace<'a> {
    /// Feed-assigned place id (primary key).
    pub id: i32,
    /// Station number.
    pub number: Option<i32>,
    /// Whether this is a fixed spot.
    pub spot: Option<bool>,
    /// Station name.
    pub name: Option<&'a str>,
    /// Station latitude.
    pub latitude: Option<f64>,
    /// Station longitude.
    pub longitude: Option<f64>,
    /// Terminal hardware type.
    pub terminal_type: Option<&'a str>,
}

impl<'a> From<&'a PlaceRecord> for NewPlace<'a> {
    fn from(rec: &'a PlaceRecord) -> Self {
        Self {
            id: rec.uid,
            number: rec.number,
            spot: rec.spot,
            name: rec.name.as_deref(),
            latitude: rec.lat,
            longitude: rec.lng,
            terminal_type: rec.terminal_type.as_deref(),
        }
    }
}

// ------------------- edges ---------------
// Composite unique pairs, no independent identity.

/// Insertable domain↔city edge for [`crate::schema::domain_city`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::domain_city)]
pub struct NewDomainCity<'a> {
    /// Domain code side of the edge.
    pub domain_code: &'a str,
    /// City id side of the edge.
    pub city_id: i32,
}

/// Insertable city↔place edge for [`crate::schema::city_place`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::city_place)]
pub struct NewCityPlace {
    /// Place id side of the edge.
    pub place_id: i32,
    /// City id side of the edge.
    pub city_id: i32,
}
