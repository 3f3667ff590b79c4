//! Typed model of one fetched feed document.
//!
//! The feed is a three-level hierarchy: domain (operator/country) → city →
//! place (one station). [`FeedTree`] holds the parsed records and exposes
//! the traversal helpers every consumer shares ([`FeedTree::domains`],
//! [`FeedTree::cities`], [`FeedTree::places`]), so persistence code never
//! re-walks XML on its own. The `cities` and `places` iterators also carry
//! the parent records, which is where the implied hierarchy edges
//! (domain↔city, city↔place) come from.

mod parse;

pub use parse::{extract_query_time, parse_feed};

/// One top-level feed grouping, identified by a short string code.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainRecord {
    /// Short domain code, e.g. "de".
    pub code: String,
    /// Operator name.
    pub name: String,
    /// Country the domain operates in.
    pub country: String,
    /// Latitude of the domain's nominal center.
    pub lat: Option<f64>,
    /// Longitude of the domain's nominal center.
    pub lng: Option<f64>,
    /// Cities nested under this domain.
    pub cities: Vec<CityRecord>,
}

/// One city grouping inside a domain.
#[derive(Debug, Clone, PartialEq)]
pub struct CityRecord {
    /// Feed-assigned city id.
    pub uid: i32,
    /// City name.
    pub name: Option<String>,
    /// Feed's own hint of how many places the city holds.
    pub num_places: Option<i32>,
    /// Latitude of the city center.
    pub lat: Option<f64>,
    /// Longitude of the city center.
    pub lng: Option<f64>,
    /// Stations nested under this city.
    pub places: Vec<PlaceRecord>,
}

/// One station, with its current occupancy reading.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRecord {
    /// Feed-assigned place id.
    pub uid: i32,
    /// Station number as printed on the terminal.
    pub number: Option<i32>,
    /// Whether this is a fixed spot (as opposed to a free-floating rack).
    pub spot: Option<bool>,
    /// Station name.
    pub name: Option<String>,
    /// Station latitude.
    pub lat: Option<f64>,
    /// Station longitude.
    pub lng: Option<f64>,
    /// Terminal hardware type.
    pub terminal_type: Option<String>,
    /// Bikes currently at the station. Occupancy is not structural: an
    /// absent or unparsable count parses to `None` instead of failing the
    /// whole document.
    pub bikes: Option<i32>,
}

/// A place together with the city and domain it hangs under.
#[derive(Debug, Clone, Copy)]
pub struct PlaceRef<'a> {
    /// The domain the place belongs to.
    pub domain: &'a DomainRecord,
    /// The city the place belongs to.
    pub city: &'a CityRecord,
    /// The place itself.
    pub place: &'a PlaceRecord,
}

/// A fully parsed feed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedTree {
    /// Top-level domain records in document order.
    pub domains: Vec<DomainRecord>,
}

impl FeedTree {
    /// Iterate over all domains in document order.
    pub fn domains(&self) -> impl Iterator<Item = &DomainRecord> {
        self.domains.iter()
    }

    /// Iterate over all `(domain, city)` pairs in document order.
    pub fn cities(&self) -> impl Iterator<Item = (&DomainRecord, &CityRecord)> {
        self.domains
            .iter()
            .flat_map(|d| d.cities.iter().map(move |c| (d, c)))
    }

    /// Iterate over all places, each with its enclosing city and domain.
    pub fn places(&self) -> impl Iterator<Item = PlaceRef<'_>> {
        self.cities().flat_map(|(domain, city)| {
            city.places
                .iter()
                .map(move |place| PlaceRef { domain, city, place })
        })
    }

    /// Total number of places in the tree.
    pub fn place_count(&self) -> usize {
        self.places().count()
    }
}
