//! The location record and its resolution tag.
//!
//! Field shapes follow `geosuggest-core`'s `CitiesRecord`/`CountryRecord`
//! split, collapsed into the single polymorphic record spec'd for this
//! index (one `struct` tagged by `resolution`, rather than one struct per
//! level) because every resolution shares the id/name/country/population/
//! importance fields and only the leaf fields differ per level.

use serde::{Deserialize, Serialize};

/// Granularity tag of a [`Record`].
///
/// Ordered from most to least specific: `City` nests inside `Admin2`
/// nests inside `Admin1` nests inside `Country`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "COUNTRY")]
    Country,
    #[serde(rename = "ADMIN_1")]
    Admin1,
    #[serde(rename = "ADMIN_2")]
    Admin2,
    #[serde(rename = "CITY")]
    City,
}

/// A single gazetteer entry: a country, a first- or second-level
/// administrative division, or a city.
///
/// Fields that don't apply to a given [`Resolution`] are left at their
/// default (empty string / `0` / `0.0`) rather than modeled as `Option`,
/// matching the original's untyped `dict` records, where absent fields
/// are simply not meaningful for that resolution rather than `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable, globally unique id (the Geonames geonameid for the
    /// underlying row).
    pub id: u32,
    pub resolution: Resolution,
    /// Normalized name — always equal to `standardize(name)` (invariant 4).
    pub name: String,

    pub country: String,
    pub country_code: String,
    pub country_id: u32,

    /// Populated for ADMIN_2 and CITY; empty/0 otherwise.
    pub admin_level_1: String,
    pub admin_level_1_id: u32,
    /// Populated for CITY; empty/0 otherwise.
    pub admin_level_2: String,
    pub admin_level_2_id: u32,

    /// Non-negative. Input value for COUNTRY and CITY; the sum of child
    /// city populations for ADMIN_1/ADMIN_2 (invariant 6).
    pub population: u64,

    /// Populated for CITY only.
    pub latitude: f64,
    pub longitude: f64,

    /// Populated for COUNTRY only: ids of neighboring countries.
    pub neighbor_country_ids: Vec<u32>,

    /// Learned `(0,1)` importance score. `0.0` until Phase 7 assigns it
    /// (an index built without the importance file has this field unset
    /// at its default, which violates invariant 7 — callers that depend
    /// on it must build with the importance file present).
    pub estimated_importance: f64,
}

impl Record {
    pub(crate) fn new(id: u32, resolution: Resolution, name: String) -> Self {
        Record {
            id,
            resolution,
            name,
            country: String::new(),
            country_code: String::new(),
            country_id: 0,
            admin_level_1: String::new(),
            admin_level_1_id: 0,
            admin_level_2: String::new(),
            admin_level_2_id: 0,
            population: 0,
            latitude: 0.0,
            longitude: 0.0,
            neighbor_country_ids: Vec::new(),
            estimated_importance: 0.0,
        }
    }
}
