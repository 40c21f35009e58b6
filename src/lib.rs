//! An in-memory gazetteer index built from Geonames dumps.
//!
//! Feed [`SourceFiles`] to [`Index::build`] (or [`Index::shared`] for a
//! process-wide lazily-built singleton) and query the result with
//! [`Index::city_search`], [`Index::country_search`], and friends. See
//! `demos/basic_usage.rs` for a runnable example.

mod builder;
mod export;
mod fixed_alt_names;
mod lookup;
mod model;
mod normalize;

pub use builder::{BuildError, SourceContent, SourceFiles};
pub use export::{to_json, to_json_pretty};
pub use lookup::Index;
pub use model::{Record, Resolution};
pub use normalize::standardize;
