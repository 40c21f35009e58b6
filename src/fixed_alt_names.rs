//! The hand-curated `(name, country, resolution) -> alt names` table for
//! builder Phase 5.
//!
//! Ported verbatim from
//! `original_source/geonamescache/geonames/manual_alternate_names.py::
//! FIXED_ALTERNATE_NAMES`, which spec.md §9 names as authoritative over
//! the shorter inline duplicate in `geonames.py::_add_fixed_alt_names`.

use crate::model::Resolution;

/// One entry: the record to find (`name`, `country`, `resolution`) and
/// the alt names to register against it once found.
pub struct FixedAltNames {
    pub name: &'static str,
    pub country: &'static str,
    pub resolution: Resolution,
    pub alt_names: &'static [&'static str],
}

pub const TABLE: &[FixedAltNames] = &[
    FixedAltNames {
        name: "United States",
        country: "United States",
        resolution: Resolution::Country,
        alt_names: &[
            "USA",
            "U.S.A.",
            "US",
            "U.S.",
            "the United States",
            "United States of America",
            "America",
        ],
    },
    FixedAltNames {
        name: "United Kingdom",
        country: "United Kingdom",
        resolution: Resolution::Country,
        alt_names: &["Great Britain", "Britain", "UK", "U.K."],
    },
    FixedAltNames {
        name: "Palestinian Territory",
        country: "Palestinian Territory",
        resolution: Resolution::Country,
        alt_names: &["Palestine", "State of Palestine"],
    },
    FixedAltNames {
        name: "South Korea",
        country: "South Korea",
        resolution: Resolution::Country,
        alt_names: &["Korea"],
    },
    FixedAltNames {
        name: "North Korea",
        country: "North Korea",
        resolution: Resolution::Country,
        alt_names: &["Korea"],
    },
    FixedAltNames {
        name: "Netherlands",
        country: "Netherlands",
        resolution: Resolution::Country,
        alt_names: &["The Netherlands", "Holland"],
    },
    FixedAltNames {
        name: "Ivory Coast",
        country: "Ivory Coast",
        resolution: Resolution::Country,
        alt_names: &["Cote d'Ivoire"],
    },
    FixedAltNames {
        name: "Washington",
        country: "United States",
        resolution: Resolution::Admin1,
        alt_names: &["Washington State"],
    },
    FixedAltNames {
        name: "New York",
        country: "United States",
        resolution: Resolution::Admin1,
        alt_names: &["NY", "N.Y."],
    },
    FixedAltNames {
        name: "Washington, D.C.",
        country: "United States",
        resolution: Resolution::City,
        alt_names: &[
            "District of Columbia",
            "Washington",
            "DC",
            "D.C.",
            "Washington, DC",
            "Washington D.C.",
            "Washington DC",
        ],
    },
    FixedAltNames {
        name: "New York City",
        country: "United States",
        resolution: Resolution::City,
        alt_names: &["NYC", "N.Y.C."],
    },
    FixedAltNames {
        name: "Venice",
        country: "Italy",
        resolution: Resolution::City,
        alt_names: &["Venezia"],
    },
    FixedAltNames {
        name: "Los Angeles",
        country: "United States",
        resolution: Resolution::City,
        alt_names: &["LA", "L.A."],
    },
];
