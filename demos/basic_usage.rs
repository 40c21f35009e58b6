//! Build an index from the checked-in fixture files and run a few
//! lookups against it.
//!
//! Run with `cargo run --example basic_usage`.

use anyhow::Result;

use gazetteer::{Index, SourceFiles};

fn main() -> Result<()> {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        let subscriber = tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(
                std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
            ))
            .with(tracing_subscriber::fmt::layer());
        subscriber.init();
    }

    let fixtures = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");

    let index = Index::build(SourceFiles {
        countries: fixtures.join("countryInfo.txt"),
        admin1_codes: fixtures.join("admin1Codes.txt"),
        admin2_codes: fixtures.join("admin2Codes.txt"),
        cities: fixtures.join("cities5000.txt"),
        alt_wiki_names: Some(fixtures.join("alt_wiki_names.json")),
        estimated_importance: Some(fixtures.join("estimated_importance.json")),
    })?;

    println!("city_search(\"san francisco\"): {:#?}", index.city_search("san francisco"));
    println!("country_search(\"USA\"): {:#?}", index.country_search("USA"));
    println!(
        "admin_level_1_search(\"Washington State\"): {:#?}",
        index.admin_level_1_search("Washington State")
    );
    println!(
        "all_locations_search(\"Africa\") (continent filter, expect empty): {:?}",
        index.all_locations_search("Africa")
    );

    Ok(())
}
