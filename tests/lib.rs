//! End-to-end tests against the scenarios of spec.md §8, run over a small
//! hand-built fixture covering the cases they exercise (a handful of
//! countries, states, counties and cities) rather than a full Geonames
//! dump — grounded on `geosuggest-core/tests/lib.rs`'s own
//! fixture-file-based integration test style.

use std::error::Error;

use gazetteer::{standardize, Index, Resolution, SourceContent};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR")))
        .unwrap_or_else(|e| panic!("reading fixture {name}: {e}"))
}

fn build_index() -> Result<Index, Box<dyn Error>> {
    let content = SourceContent {
        countries: fixture("countryInfo.txt"),
        admin1_codes: fixture("admin1Codes.txt"),
        admin2_codes: fixture("admin2Codes.txt"),
        cities: fixture("cities5000.txt"),
        alt_wiki_names: Some(fixture("alt_wiki_names.json")),
        estimated_importance: Some(fixture("estimated_importance.json")),
    };
    Ok(Index::build_from_content(content)?)
}

#[test]
fn continent_names_are_filtered_out() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;
    assert!(index.all_locations_search("Africa").is_empty());
    assert!(index.all_locations_search("Pacific").is_empty());
    assert!(index.all_locations_search("EU").is_empty());
    Ok(())
}

#[test]
fn city_search_san_francisco() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;
    let results = index.city_search("san francisco");
    assert!(results.len() > 1, "expected more than one San Francisco");
    assert!(results.values().all(|r| r.resolution == Resolution::City));
    assert!(results
        .values()
        .any(|r| r.admin_level_1 == "California" && r.country == "United States"));
    Ok(())
}

#[test]
fn country_search_japan_is_exact() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;
    let results = index.country_search("japan");
    assert_eq!(results.len(), 1);
    let (_, record) = results.iter().next().unwrap();
    assert_eq!(record.resolution, Resolution::Country);
    assert_eq!(record.name, "Japan");
    Ok(())
}

#[test]
fn all_locations_search_lebanon_spans_country_and_city() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;
    let results = index.all_locations_search("lebanon");
    assert!(results.values().any(|r| r.resolution == Resolution::Country));
    assert!(results.values().any(|r| r.resolution == Resolution::City));
    Ok(())
}

#[test]
fn washington_state_alt_name_resolves_to_admin1() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;
    let results = index.admin_level_1_search("Washington State");
    assert_eq!(results.len(), 1);
    let (_, record) = results.iter().next().unwrap();
    assert_eq!(record.name, "Washington");
    assert_eq!(record.resolution, Resolution::Admin1);
    Ok(())
}

#[test]
fn fixed_alt_names_resolve_to_expected_records() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;

    for alt in ["USA", "U.S.", "America"] {
        let results = index.country_search(alt);
        assert_eq!(results.len(), 1, "lookup of {alt} failed");
        assert_eq!(results.values().next().unwrap().name, "United States");
    }

    let nyc = index.city_search("NYC");
    assert_eq!(nyc.len(), 1);
    assert_eq!(nyc.values().next().unwrap().name, "New York City");

    let st_louis = index.city_search("St. Louis");
    assert_eq!(st_louis.len(), 1);
    assert_eq!(st_louis.values().next().unwrap().name, "St Louis");

    Ok(())
}

#[test]
fn us_state_bare_and_dotted_code_aliases_resolve() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;
    // US state special-case: bare and dotted 2-letter admin1 codes.
    let ca = index.admin_level_1_search("CA");
    assert_eq!(ca.len(), 1);
    assert_eq!(ca.values().next().unwrap().name, "California");

    let ca_dotted = index.admin_level_1_search("C.A.");
    assert_eq!(ca_dotted.len(), 1);
    assert_eq!(ca_dotted.values().next().unwrap().name, "California");
    Ok(())
}

#[test]
fn wiki_alt_name_resolves_for_populous_city() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;
    let results = index.city_search("Peking");
    assert_eq!(results.len(), 1);
    assert_eq!(results.values().next().unwrap().name, "Beijing");
    Ok(())
}

#[test]
fn standardize_case_policy() {
    assert_eq!(standardize("US"), "US");
    assert_eq!(standardize("usa"), "usa");
    assert_eq!(standardize("U.S.A."), "U.S.A.");
    assert_eq!(standardize("japan"), "Japan");
    assert_eq!(standardize("washington, d.c."), "Washington, D.C.");
    assert_eq!(standardize("São pauLo"), "Sao Paulo");
}

#[test]
fn washington_dc_importance_is_overridden() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;
    let results = index.city_search("Washington, D.C.");
    assert_eq!(results.len(), 1);
    let record = results.values().next().unwrap();
    assert_eq!(record.country, "United States");
    assert_eq!(record.estimated_importance, 0.8);
    Ok(())
}

#[test]
fn admin_population_is_sum_of_child_cities() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;

    // California admin-1 gets San Francisco (874961) + Los Angeles (3990456).
    let ca = index.admin_level_1_search("California");
    assert_eq!(ca.len(), 1);
    let ca = ca.values().next().unwrap();
    assert_eq!(ca.population, 874_961 + 3_990_456);

    // San Francisco county admin-2 gets only the San Francisco city record
    // whose admin2 code points at it.
    let county = index.admin_level_2_search("San Francisco County");
    assert_eq!(county.len(), 1);
    assert_eq!(county.values().next().unwrap().population, 874_961);

    Ok(())
}

#[test]
fn every_id_is_reachable_from_every_alias_with_identical_record() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;

    let usa_by_name = index.country_search("United States");
    let (&id, by_name_record) = usa_by_name.iter().next().unwrap();
    let by_id_record = index.get_location_by_id(id).unwrap();
    assert_eq!(by_name_record, &by_id_record);

    Ok(())
}

#[test]
fn every_record_name_is_its_own_standardized_form() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;
    for id in [6252001_u32, 1861060, 5332921, 5391997, 5391959, 1816670] {
        let record = index.get_location_by_id(id).expect("fixture record");
        assert_eq!(record.name, standardize(&record.name));
    }
    Ok(())
}

#[test]
fn importance_is_in_open_unit_interval_when_importance_file_present() -> Result<(), Box<dyn Error>>
{
    let index = build_index()?;
    for id in [
        6252001_u32,
        1861060,
        2921044,
        2017370,
        2077456,
        3996063,
        357994,
        5128581,
        2643743,
        3169070,
        4140963,
    ] {
        let record = index.get_location_by_id(id).expect("fixture record");
        assert!(
            record.estimated_importance > 0.0 && record.estimated_importance < 1.0,
            "{} has importance {}",
            record.name,
            record.estimated_importance
        );
    }
    Ok(())
}

#[test]
fn key_importances_meet_tier_thresholds() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;
    let importance_of = |id: u32| index.get_location_by_id(id).unwrap().estimated_importance;

    // United States, Germany, Russia, Japan.
    for id in [6252001, 2921044, 2017370, 1861060] {
        assert!(importance_of(id) >= 0.9);
    }
    // Australia, Mexico, Egypt.
    for id in [2077456, 3996063, 357994] {
        assert!(importance_of(id) >= 0.8);
    }
    // New York City, London, Rome, Washington D.C.
    assert!(importance_of(5128581) >= 0.7);
    assert!(importance_of(2643743) >= 0.7);
    assert!(importance_of(3169070) >= 0.7);
    assert!(importance_of(4140963) >= 0.7);

    Ok(())
}

#[test]
fn neighbor_country_ids_resolve_to_countries() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;
    let usa = index.country_search("United States");
    let usa = usa.values().next().unwrap();
    assert!(!usa.neighbor_country_ids.is_empty());
    for neighbor_id in &usa.neighbor_country_ids {
        let neighbor = index.get_location_by_id(*neighbor_id).expect("neighbor exists");
        assert_eq!(neighbor.resolution, Resolution::Country);
    }
    Ok(())
}

#[test]
fn build_without_optional_files_still_succeeds() -> Result<(), Box<dyn Error>> {
    let content = SourceContent {
        countries: fixture("countryInfo.txt"),
        admin1_codes: fixture("admin1Codes.txt"),
        admin2_codes: fixture("admin2Codes.txt"),
        cities: fixture("cities5000.txt"),
        alt_wiki_names: None,
        estimated_importance: None,
    };
    let index = Index::build_from_content(content)?;
    // Phases 1-5 still ran; importance just stays at its zero default.
    let results = index.country_search("japan");
    assert_eq!(results.len(), 1);
    assert_eq!(results.values().next().unwrap().estimated_importance, 0.0);
    Ok(())
}

#[test]
fn unknown_name_and_id_yield_empty_not_error() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;
    assert!(index.city_search("Nowhereville").is_empty());
    assert!(index.get_location_by_id(999_999_999).is_none());
    Ok(())
}

#[test]
fn json_export_nests_by_name_then_by_id() -> Result<(), Box<dyn Error>> {
    let index = build_index()?;
    let raw = gazetteer::to_json(&index)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;

    let by_id = value
        .get("Japan")
        .expect("Japan key present in exported document");
    let record = by_id
        .get("1861060")
        .expect("Japan's geoname id present under its name");
    assert_eq!(record["resolution"], "COUNTRY");
    assert_eq!(record["name"], "Japan");

    Ok(())
}
