//! Name normalization: the single function that decides which surface
//! strings collide in the index.
//!
//! Ported from `original_source/geonamescache/osm_names/utils.py`
//! (`standardize_loc_name`, `get_alt_punc_names`); `geosuggest-core` has
//! no equivalent (Geonames rows already carry an ASCII `asciiname`
//! column), so this module's algorithm comes from the original, and
//! `deunicode` is borrowed from `holg-geodb-rs`'s `fold_key` for the same
//! transliteration job.

/// The 32 ASCII punctuation code points, per spec.
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(c)
}

/// Normalize a location name for indexing.
///
/// 1. ASCII-fold via `deunicode` (`São Paulo` -> `Sao Paulo`).
/// 2. Count non-punctuation characters.
/// 3. If more than three, title-case the result; otherwise leave the
///    folded string's case untouched.
///
/// An empty input returns an empty string (treated as "absent": empty
/// names are never inserted into `by_name`, invariant 8).
pub fn standardize(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let folded = deunicode::deunicode(name);

    let non_punct = folded.chars().filter(|c| !is_punctuation(*c)).count();
    if non_punct > 3 {
        title_case(&folded)
    } else {
        folded
    }
}

/// Title-case a string the way Python's `str.title()` does: any
/// alphabetic character immediately following a non-alphabetic one (or
/// the start of the string) is upper-cased, every other alphabetic
/// character is lower-cased, and non-alphabetic characters pass through
/// unchanged. This is what makes `.` and `,` word boundaries, so
/// `"washington, d.c."` becomes `"Washington, D.C."`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_ascii_alphabetic() {
            if prev_alpha {
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c.to_ascii_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len() && s[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Generate punctuation-variant surface forms of `name` (duplicates
/// allowed — the caller deduplicates via a `HashSet`/re-`standardize`
/// pass). Each variant still needs to be re-passed through
/// [`standardize`] before being used as an index key.
pub fn alt_punc_names(name: &str) -> Vec<String> {
    let mut variants = Vec::with_capacity(8);

    variants.push(name.replace('\'', ""));
    variants.push(name.replace('-', " "));

    variants.push(match strip_prefix_ci(name, "St ") {
        Some(rest) => format!("St. {rest}"),
        None => name.to_string(),
    });
    variants.push(match strip_prefix_ci(name, "Saint ") {
        Some(rest) => format!("St. {rest}"),
        None => name.to_string(),
    });
    variants.push(match strip_prefix_ci(name, "The ") {
        Some(rest) => rest.to_string(),
        None => name.to_string(),
    });
    variants.push(match strip_prefix_ci(name, "City of ") {
        Some(rest) => rest.to_string(),
        None => name.to_string(),
    });

    variants.push(name.split('(').next().unwrap_or(name).trim().to_string());
    variants.push(name.split(',').next().unwrap_or(name).trim().to_string());

    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_case_sensitive() {
        assert_eq!(standardize("US"), "US");
        assert_eq!(standardize("usa"), "usa");
        assert_eq!(standardize("U.S.A."), "U.S.A.");
    }

    #[test]
    fn long_names_are_title_cased() {
        assert_eq!(standardize("japan"), "Japan");
        assert_eq!(standardize("washington, d.c."), "Washington, D.C.");
    }

    #[test]
    fn ascii_folding() {
        assert_eq!(standardize("São pauLo"), "Sao Paulo");
        assert_eq!(standardize("Leganés"), "Leganes");
    }

    #[test]
    fn idempotent() {
        for s in ["US", "usa", "japan", "São Paulo", "washington, d.c."] {
            let once = standardize(s);
            assert_eq!(standardize(&once), once);
        }
    }

    #[test]
    fn empty_is_empty() {
        assert_eq!(standardize(""), "");
    }

    #[test]
    fn alt_punc() {
        assert!(alt_punc_names("Na'Man").contains(&"NaMan".to_string()));
        assert!(alt_punc_names("Ust-Abakan").contains(&"Ust Abakan".to_string()));
        assert!(alt_punc_names("St Louis").contains(&"St. Louis".to_string()));
        assert!(alt_punc_names("Saint Petersburg").contains(&"St. Petersburg".to_string()));
        assert!(alt_punc_names("The Netherlands").contains(&"Netherlands".to_string()));
        assert!(alt_punc_names("City of New York").contains(&"New York".to_string()));
        assert!(alt_punc_names("Hey (there)").contains(&"Hey".to_string()));
        assert!(alt_punc_names("Hey, there").contains(&"Hey".to_string()));
    }
}
