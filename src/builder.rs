//! The multi-pass ingestion pipeline (spec.md §4.2): countries, then
//! admin-1, then admin-2, then cities, then three alternate-name passes,
//! then importance assignment — in that strict order, because later
//! phases resolve parent ids by looking earlier ones up in scratch maps.
//!
//! Grounded on `original_source/geonamescache/geonames/geonames.py`
//! (`_load_country_data`/`_load_admin1_data`/`_load_admin2_data`/
//! `_load_city_data`/`_add_alternate_names`/`load_data`) for phase
//! semantics, and `geosuggest-core/src/index.rs` for Rust shape (raw
//! per-row `serde::Deserialize` structs matching Geonames' column order,
//! `csv::Reader` over TSV, `#[cfg(feature = "tracing")]` phase timing).
//!
//! Unlike the teacher, parsing here is strictly sequential: spec.md §5
//! states the build is single-threaded because phases have ordering
//! dependencies, so the teacher's `rayon`-chunked parsing is dropped.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use itertools::Itertools;
use serde::Deserialize;

use crate::fixed_alt_names;
use crate::model::{Record, Resolution};
use crate::normalize::{alt_punc_names, standardize};
use crate::Index;

#[cfg(feature = "tracing")]
use std::time::Instant;

/// Feature codes retained from the cities file (spec.md §4.2 Phase 4).
const KEEP_FEATURE_CODES: &[&str] = &[
    "PPL", "PPLA", "PPLA2", "PPLA3", "PPLA4", "PPLC", "PPLF", "PPLG", "PPLL", "PPLR", "PPLS",
    "PPLX",
];

const MIN_POPULATION_FOR_WIKI_ALT_NAMES: u64 = 100_000;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {file} as tab-separated data: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
    #[error("failed to parse {file} as JSON: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

/// File paths consumed by [`crate::Index::build`]. The four tab-separated
/// files are mandatory inputs (spec.md §6); the two JSON files are
/// individually optional (spec.md §4.4) — pass `None` to skip that phase.
pub struct SourceFiles<P: AsRef<Path>> {
    pub countries: P,
    pub admin1_codes: P,
    pub admin2_codes: P,
    pub cities: P,
    pub alt_wiki_names: Option<P>,
    pub estimated_importance: Option<P>,
}

/// The same inputs as [`SourceFiles`], already read into memory — useful
/// for tests and for callers that fetch the files themselves.
pub struct SourceContent {
    pub countries: String,
    pub admin1_codes: String,
    pub admin2_codes: String,
    pub cities: String,
    pub alt_wiki_names: Option<String>,
    pub estimated_importance: Option<String>,
}

pub fn build_from_files<P: AsRef<Path>>(files: SourceFiles<P>) -> Result<Index, BuildError> {
    let content = SourceContent {
        countries: read_to_string(files.countries)?,
        admin1_codes: read_to_string(files.admin1_codes)?,
        admin2_codes: read_to_string(files.admin2_codes)?,
        cities: read_to_string(files.cities)?,
        alt_wiki_names: files.alt_wiki_names.map(read_to_string).transpose()?,
        estimated_importance: files
            .estimated_importance
            .map(read_to_string)
            .transpose()?,
    };
    build_from_content(content)
}

fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, BuildError> {
    std::fs::read_to_string(&path).map_err(|source| BuildError::Io {
        file: path.as_ref().display().to_string(),
        source,
    })
}

fn csv_reader(content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        // real Geonames dumps contain bare `"` as literal data; it must
        // never be treated as CSV quoting syntax (spec.md §6).
        .quoting(false)
        .from_reader(content.as_bytes())
}

fn skip_comment_lines(content: &str) -> String {
    content.lines().filter(|l| !l.starts_with('#')).join("\n")
}

pub fn build_from_content(content: SourceContent) -> Result<Index, BuildError> {
    let mut arena = Arena::default();

    let country_by_iso = load_countries(&mut arena, &content.countries)?;
    let admin1_by_code = load_admin1(&mut arena, &content.admin1_codes, &country_by_iso)?;
    let admin2_by_code = load_admin2(
        &mut arena,
        &content.admin2_codes,
        &country_by_iso,
        &admin1_by_code,
    )?;
    load_cities(
        &mut arena,
        &content.cities,
        &country_by_iso,
        &admin1_by_code,
        &admin2_by_code,
    )?;

    apply_fixed_alt_names(&mut arena);

    if let Some(ref raw) = content.alt_wiki_names {
        apply_wiki_alt_names(&mut arena, raw)?;
    } else {
        #[cfg(feature = "tracing")]
        tracing::warn!("alt_wiki_names file not provided, skipping wiki alt-name phase");
    }

    if let Some(ref raw) = content.estimated_importance {
        apply_importance(&mut arena, raw)?;
    } else {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            "estimated_importance file not provided, records will keep estimated_importance == 0.0"
        );
    }

    arena.names.remove("");

    Ok(arena.freeze())
}

/// Build-time arena: a `Vec<Record>` addressed by id, plus a
/// name -> id-set scratch index. Multiple names can point at the same
/// id, and mutating `records[idx]` (population sums, importance) is
/// visible no matter which name found it — the "shared record identity"
/// spec.md §9 asks for, implemented the way it suggests (an arena
/// instead of `Rc<RefCell<_>>` aliasing).
#[derive(Default)]
struct Arena {
    records: Vec<Record>,
    id_to_index: HashMap<u32, usize>,
    names: HashMap<String, HashSet<u32>>,
}

impl Arena {
    fn push(&mut self, record: Record) {
        let id = record.id;
        assert!(
            !self.id_to_index.contains_key(&id),
            "duplicate geoname id {id} encountered while building the index"
        );
        self.id_to_index.insert(id, self.records.len());
        self.records.push(record);
    }

    fn record(&self, id: u32) -> &Record {
        &self.records[self.id_to_index[&id]]
    }

    fn record_mut(&mut self, id: u32) -> &mut Record {
        let idx = self.id_to_index[&id];
        &mut self.records[idx]
    }

    fn get(&self, id: u32) -> Option<&Record> {
        self.id_to_index.get(&id).map(|&idx| &self.records[idx])
    }

    fn add_name(&mut self, id: u32, name: &str) {
        if name.is_empty() {
            return;
        }
        self.names.entry(name.to_string()).or_default().insert(id);
    }

    /// Install the primary name plus every deduplicated punctuation
    /// variant (spec.md §4.1/§4.2: "insert...under the standardized
    /// primary name and every deduplicated punctuation variant").
    fn install_name_variants(&mut self, id: u32, primary_std: &str) {
        let mut seen = HashSet::new();
        seen.insert(primary_std.to_string());
        for variant in alt_punc_names(primary_std) {
            seen.insert(standardize(&variant));
        }
        for name in seen {
            self.add_name(id, &name);
        }
    }

    fn freeze(self) -> Index {
        let by_id: HashMap<u32, Record> =
            self.records.into_iter().map(|r| (r.id, r)).collect();

        let by_name: HashMap<String, HashMap<u32, Record>> = self
            .names
            .into_iter()
            .map(|(name, ids)| {
                let records = ids
                    .into_iter()
                    .filter_map(|id| by_id.get(&id).map(|r| (id, r.clone())))
                    .collect();
                (name, records)
            })
            .collect();

        Index { by_name, by_id }
    }
}

#[derive(Debug, Deserialize)]
struct CountryRow {
    iso: String,
    _iso3: String,
    _iso_numeric: String,
    _fips: String,
    name: String,
    _capital: String,
    _area_km2: String,
    population: u64,
    _continent_code: String,
    _tld: String,
    _currency_code: String,
    _currency_name: String,
    _phone: String,
    _postal_code_format: String,
    _postal_code_regex: String,
    _languages: String,
    geoname_id: u32,
    neighbors: String,
    _equivalent_fips_code: String,
}

fn load_countries(
    arena: &mut Arena,
    content: &str,
) -> Result<HashMap<String, u32>, BuildError> {
    #[cfg(feature = "tracing")]
    let now = Instant::now();

    let content = skip_comment_lines(content);
    let mut reader = csv_reader(&content);

    let mut country_by_iso = HashMap::new();
    let mut neighbors_raw: HashMap<u32, String> = HashMap::new();

    for row in reader.deserialize() {
        let row: CountryRow = row.map_err(|source| BuildError::Csv {
            file: "countryInfo.txt".to_string(),
            source,
        })?;

        if row.geoname_id == 0 {
            continue;
        }
        let std_name = standardize(&row.name);
        if std_name.is_empty() {
            continue;
        }

        let iso = row.iso.to_uppercase();

        let mut record = Record::new(row.geoname_id, Resolution::Country, std_name.clone());
        record.country = std_name.clone();
        record.country_id = row.geoname_id;
        record.country_code = iso.clone();
        record.population = row.population;

        arena.push(record);
        arena.install_name_variants(row.geoname_id, &std_name);

        country_by_iso.insert(iso.clone(), row.geoname_id);
        neighbors_raw.insert(row.geoname_id, row.neighbors);
    }

    // resolve neighbor_country_ids now that every country id is known;
    // unknown neighbor codes are dropped silently (spec.md §4.2).
    for (id, raw) in neighbors_raw {
        let ids = raw
            .split(',')
            .filter_map(|code| country_by_iso.get(code.trim().to_uppercase().as_str()))
            .copied()
            .collect();
        arena.record_mut(id).neighbor_country_ids = ids;
    }

    #[cfg(feature = "tracing")]
    tracing::info!(
        "loaded {} countries in {}ms",
        country_by_iso.len(),
        now.elapsed().as_millis()
    );

    Ok(country_by_iso)
}

#[derive(Debug, Deserialize)]
struct AdminCodeRow {
    full_code: String,
    name: String,
    _ascii_name: String,
    geoname_id: u32,
}

fn load_admin1(
    arena: &mut Arena,
    content: &str,
    country_by_iso: &HashMap<String, u32>,
) -> Result<HashMap<String, u32>, BuildError> {
    #[cfg(feature = "tracing")]
    let now = Instant::now();

    let mut reader = csv_reader(content);
    let mut admin1_by_code = HashMap::new();

    for row in reader.deserialize() {
        let row: AdminCodeRow = row.map_err(|source| BuildError::Csv {
            file: "admin1Codes.txt".to_string(),
            source,
        })?;

        if row.geoname_id == 0 {
            continue;
        }
        let std_name = standardize(&row.name);
        if std_name.is_empty() {
            continue;
        }

        let mut parts = row.full_code.splitn(2, '.');
        let country_code = parts.next().unwrap_or_default().to_uppercase();
        let admin1_code = parts.next().unwrap_or_default();

        let country_id = *country_by_iso.get(&country_code).unwrap_or_else(|| {
            panic!(
                "admin1 code {} references unknown country {country_code}",
                row.full_code
            )
        });
        let country_name = arena.record(country_id).country.clone();

        let mut record = Record::new(row.geoname_id, Resolution::Admin1, std_name.clone());
        record.country = country_name;
        record.country_id = country_id;
        record.country_code = country_code.clone();

        arena.push(record);
        arena.install_name_variants(row.geoname_id, &std_name);

        if country_code == "US" && admin1_code.len() == 2 {
            let bare = standardize(admin1_code);
            arena.add_name(row.geoname_id, &bare);

            let mut dotted = String::with_capacity(4);
            for c in admin1_code.chars() {
                dotted.push(c);
                dotted.push('.');
            }
            arena.add_name(row.geoname_id, &standardize(&dotted));
        }

        admin1_by_code.insert(row.full_code.clone(), row.geoname_id);
    }

    #[cfg(feature = "tracing")]
    tracing::info!(
        "loaded {} admin1 codes in {}ms",
        admin1_by_code.len(),
        now.elapsed().as_millis()
    );

    Ok(admin1_by_code)
}

fn load_admin2(
    arena: &mut Arena,
    content: &str,
    country_by_iso: &HashMap<String, u32>,
    admin1_by_code: &HashMap<String, u32>,
) -> Result<HashMap<String, u32>, BuildError> {
    #[cfg(feature = "tracing")]
    let now = Instant::now();

    let mut reader = csv_reader(content);
    let mut admin2_by_code = HashMap::new();

    for row in reader.deserialize() {
        let row: AdminCodeRow = row.map_err(|source| BuildError::Csv {
            file: "admin2Codes.txt".to_string(),
            source,
        })?;

        if row.geoname_id == 0 {
            continue;
        }
        let std_name = standardize(&row.name);
        if std_name.is_empty() {
            continue;
        }

        let mut parts = row.full_code.splitn(3, '.');
        let country_code = parts.next().unwrap_or_default().to_uppercase();
        let admin1_code = parts.next().unwrap_or_default();

        let country_id = *country_by_iso.get(&country_code).unwrap_or_else(|| {
            panic!(
                "admin2 code {} references unknown country {country_code}",
                row.full_code
            )
        });
        let country_name = arena.record(country_id).country.clone();

        let admin1_key = format!("{country_code}.{admin1_code}");
        let admin1 = admin1_by_code.get(&admin1_key).map(|&id| {
            let r = arena.record(id);
            (id, r.name.clone())
        });

        let mut record = Record::new(row.geoname_id, Resolution::Admin2, std_name.clone());
        record.country = country_name;
        record.country_id = country_id;
        record.country_code = country_code;
        if let Some((id, name)) = admin1 {
            record.admin_level_1 = name;
            record.admin_level_1_id = id;
        }

        arena.push(record);
        arena.install_name_variants(row.geoname_id, &std_name);

        admin2_by_code.insert(row.full_code.clone(), row.geoname_id);
    }

    #[cfg(feature = "tracing")]
    tracing::info!(
        "loaded {} admin2 codes in {}ms",
        admin2_by_code.len(),
        now.elapsed().as_millis()
    );

    Ok(admin2_by_code)
}

#[derive(Debug, Deserialize)]
struct CityRow {
    geoname_id: u32,
    name: String,
    _ascii_name: String,
    _alternate_names: String,
    latitude: f64,
    longitude: f64,
    _feature_class: String,
    feature_code: String,
    country_code: String,
    _cc2: String,
    admin1_code: String,
    admin2_code: String,
    _admin3_code: String,
    _admin4_code: String,
    population: u64,
    _elevation: String,
    _dem: String,
    _timezone: String,
    _modification_date: String,
}

fn load_cities(
    arena: &mut Arena,
    content: &str,
    country_by_iso: &HashMap<String, u32>,
    admin1_by_code: &HashMap<String, u32>,
    admin2_by_code: &HashMap<String, u32>,
) -> Result<(), BuildError> {
    #[cfg(feature = "tracing")]
    let now = Instant::now();
    #[cfg(feature = "tracing")]
    let mut count = 0usize;

    let mut reader = csv_reader(content);

    for row in reader.deserialize() {
        let row: CityRow = row.map_err(|source| BuildError::Csv {
            file: "cities5000.txt".to_string(),
            source,
        })?;

        if !KEEP_FEATURE_CODES.contains(&row.feature_code.to_uppercase().as_str()) {
            continue;
        }
        if row.geoname_id == 0 {
            continue;
        }
        let std_name = standardize(&row.name);
        if std_name.is_empty() {
            continue;
        }

        let country_code = row.country_code.to_uppercase();
        let country_id = *country_by_iso.get(&country_code).unwrap_or_else(|| {
            panic!(
                "city {} (id {}) references unknown country {country_code}",
                row.name, row.geoname_id
            )
        });
        let country_name = arena.record(country_id).country.clone();

        let admin1_key = format!("{country_code}.{}", row.admin1_code);
        let admin1 = admin1_by_code.get(&admin1_key).map(|&id| {
            let r = arena.record(id);
            (id, r.name.clone())
        });

        let admin2_key = format!("{country_code}.{}.{}", row.admin1_code, row.admin2_code);
        let admin2 = admin2_by_code.get(&admin2_key).map(|&id| {
            let r = arena.record(id);
            (id, r.name.clone())
        });

        let mut record = Record::new(row.geoname_id, Resolution::City, std_name.clone());
        record.country = country_name;
        record.country_id = country_id;
        record.country_code = country_code;
        record.population = row.population;
        record.latitude = row.latitude;
        record.longitude = row.longitude;
        if let Some((id, name)) = &admin1 {
            record.admin_level_1 = name.clone();
            record.admin_level_1_id = *id;
        }
        if let Some((id, name)) = &admin2 {
            record.admin_level_2 = name.clone();
            record.admin_level_2_id = *id;
        }

        arena.push(record);
        arena.install_name_variants(row.geoname_id, &std_name);

        if let Some((id, _)) = admin1 {
            arena.record_mut(id).population += row.population;
        }
        if let Some((id, _)) = admin2 {
            arena.record_mut(id).population += row.population;
        }

        #[cfg(feature = "tracing")]
        {
            count += 1;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::info!("loaded {count} cities in {}ms", now.elapsed().as_millis());

    Ok(())
}

fn apply_fixed_alt_names(arena: &mut Arena) {
    for entry in fixed_alt_names::TABLE {
        let key = standardize(entry.name);
        let matches: Vec<u32> = arena
            .names
            .get(&key)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&id| {
                let r = arena.record(id);
                r.name == entry.name && r.country == entry.country && r.resolution == entry.resolution
            })
            .collect();

        assert_eq!(
            matches.len(),
            1,
            "fixed alt name entry for {} ({}, {:?}) resolved to {} records, expected exactly 1",
            entry.name,
            entry.country,
            entry.resolution,
            matches.len()
        );
        let id = matches[0];

        for alt in entry.alt_names {
            arena.add_name(id, &standardize(alt));
        }
    }
}

fn apply_wiki_alt_names(arena: &mut Arena, raw: &str) -> Result<(), BuildError> {
    let alt_names_by_id: HashMap<u32, Vec<String>> =
        serde_json::from_str(raw).map_err(|source| BuildError::Json {
            file: "alt_wiki_names.json".to_string(),
            source,
        })?;

    for (id, alt_names) in alt_names_by_id {
        let Some(record) = arena.get(id) else {
            continue;
        };
        if record.population < MIN_POPULATION_FOR_WIKI_ALT_NAMES {
            continue;
        }
        for alt_name in alt_names {
            arena.add_name(id, &standardize(&alt_name));
        }
    }

    Ok(())
}

fn apply_importance(arena: &mut Arena, raw: &str) -> Result<(), BuildError> {
    let importance_by_id: HashMap<u32, f64> =
        serde_json::from_str(raw).map_err(|source| BuildError::Json {
            file: "estimated_importance.json".to_string(),
            source,
        })?;

    let ids: Vec<u32> = arena.id_to_index.keys().copied().collect();
    for id in ids {
        if let Some(&importance) = importance_by_id.get(&id) {
            arena.record_mut(id).estimated_importance = importance;
        }
    }

    // Washington, D.C. is special-cased to a fixed importance regardless
    // of what the predictions file says (spec.md §4.2 Phase 7).
    let key = standardize("Washington, D.C.");
    let matches: Vec<u32> = arena
        .names
        .get(&key)
        .into_iter()
        .flatten()
        .copied()
        .filter(|&id| {
            let r = arena.record(id);
            r.name == "Washington, D.C."
                && r.country == "United States"
                && r.resolution == Resolution::City
        })
        .collect();
    assert_eq!(
        matches.len(),
        1,
        "expected exactly one Washington, D.C. city record, found {}",
        matches.len()
    );
    arena.record_mut(matches[0]).estimated_importance = 0.8;

    Ok(())
}
