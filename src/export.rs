//! JSON re-export of the name index (spec.md §6: "A repackaging utility
//! (out of scope) may serialize `by_name` as a single JSON document
//! `{normalized_name: {id_string: record}}`").
//!
//! The CLI wrapper that writes this to disk is out of scope (spec.md
//! §1); this module only provides the data shape, grounded on
//! `geosuggest-core`'s `serde_json`-based `Engine` dump in spirit
//! (though the teacher persists via `rkyv`/`bincode`, which is out of
//! scope here per the spec's no-bespoke-persistence-format non-goal).

use std::collections::HashMap;

use crate::lookup::Index;
use crate::model::Record;

/// Serialize `index.by_name` as `{normalized_name: {id_string: record}}`.
///
/// `serde_json` only accepts string map keys, so ids are re-keyed as
/// their decimal string form on the way out.
pub fn to_json(index: &Index) -> serde_json::Result<String> {
    serde_json::to_string(&as_json_value(index))
}

pub fn to_json_pretty(index: &Index) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&as_json_value(index))
}

fn as_json_value(index: &Index) -> HashMap<String, HashMap<String, &Record>> {
    index
        .by_name
        .iter()
        .map(|(name, records)| {
            let by_id_string: HashMap<String, &Record> = records
                .iter()
                .map(|(id, record)| (id.to_string(), record))
                .collect();
            (name.clone(), by_id_string)
        })
        .collect()
}
