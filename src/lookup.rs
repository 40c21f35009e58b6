//! The frozen index and its read-only query facade.
//!
//! Grounded on `original_source/geonamescache/geonames/data_source.py`
//! (`DataSource`: `city_search`, `admin_level_1_search`,
//! `admin_level_2_search`, `country_search`, `all_locations_search`,
//! `get_location_by_id`, all routed through a private `_name_search`)
//! and on `geosuggest-core/src/lib.rs`'s `Engine` for the Rust shape of
//! a thin read-only facade over a built index, plus `once_cell`'s
//! process-wide lazy singleton (borrowed from `holg-geodb-rs`) for the
//! "first request builds and caches" lifecycle of spec.md §5.

use std::collections::HashMap;

use once_cell::sync::OnceCell;

use crate::builder::{self, BuildError, SourceContent, SourceFiles};
use crate::model::{Record, Resolution};

/// Fixed continent names short-circuited by every name search
/// (spec.md §4.3).
const CONTINENTS: &[&str] = &[
    "Antarctica",
    "North America",
    "South America",
    "Central America",
    "Oceania",
    "Africa",
    "Asia",
    "Europe",
    "EU",
    "Middle East",
];

/// Fixed ocean names short-circuited alongside the continents.
const OCEANS: &[&str] = &["Atlantic", "Pacific", "Indian", "Southern", "Arctic"];

/// The frozen `(by_name, by_id)` pair produced by [`crate::builder`].
///
/// Once built, an `Index` never changes; every lookup method takes
/// `&self` and hands back owned copies, so it can be shared across
/// unlimited concurrent readers without synchronization (spec.md §5).
pub struct Index {
    pub(crate) by_name: HashMap<String, HashMap<u32, Record>>,
    pub(crate) by_id: HashMap<u32, Record>,
}

static SHARED: OnceCell<Index> = OnceCell::new();

impl Index {
    /// Build an index from files on disk.
    pub fn build<P: AsRef<std::path::Path>>(files: SourceFiles<P>) -> Result<Index, BuildError> {
        builder::build_from_files(files)
    }

    /// Build an index from already-read file contents — useful for
    /// callers that fetch the five inputs themselves, and for tests
    /// that exercise the pipeline against in-memory fixtures.
    pub fn build_from_content(content: SourceContent) -> Result<Index, BuildError> {
        builder::build_from_content(content)
    }

    /// The process-wide lazily-built index, built from `files` on first
    /// call and reused (never rebuilt or invalidated) on every
    /// subsequent call, matching the Python module's lazy-singleton
    /// global (spec.md §5).
    pub fn shared<P: AsRef<std::path::Path>>(
        files: SourceFiles<P>,
    ) -> Result<&'static Index, BuildError> {
        if let Some(index) = SHARED.get() {
            return Ok(index);
        }
        let index = builder::build_from_files(files)?;
        Ok(SHARED.get_or_init(|| index))
    }

    /// `city_search` (spec.md §4.3).
    pub fn city_search(&self, name: &str) -> HashMap<u32, Record> {
        self.search(name, Some(Resolution::City))
    }

    /// `admin_level_1_search` (spec.md §4.3).
    pub fn admin_level_1_search(&self, name: &str) -> HashMap<u32, Record> {
        self.search(name, Some(Resolution::Admin1))
    }

    /// `admin_level_2_search` (spec.md §4.3).
    pub fn admin_level_2_search(&self, name: &str) -> HashMap<u32, Record> {
        self.search(name, Some(Resolution::Admin2))
    }

    /// `country_search` (spec.md §4.3).
    pub fn country_search(&self, name: &str) -> HashMap<u32, Record> {
        self.search(name, Some(Resolution::Country))
    }

    /// `all_locations_search` (spec.md §4.3).
    pub fn all_locations_search(&self, name: &str) -> HashMap<u32, Record> {
        self.search(name, None)
    }

    /// `get_location_by_id` (spec.md §4.3).
    pub fn get_location_by_id(&self, id: u32) -> Option<Record> {
        self.by_id.get(&id).cloned()
    }

    fn search(&self, name: &str, resolution: Option<Resolution>) -> HashMap<u32, Record> {
        let standardized = crate::normalize::standardize(name);

        if CONTINENTS.contains(&standardized.as_str()) || OCEANS.contains(&standardized.as_str())
        {
            return HashMap::new();
        }

        let Some(candidates) = self.by_name.get(&standardized) else {
            return HashMap::new();
        };

        candidates
            .iter()
            .filter(|(_, record)| match resolution {
                Some(r) => record.resolution == r,
                None => true,
            })
            .map(|(&id, record)| (id, record.clone()))
            .collect()
    }
}
