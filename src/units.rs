//! # Unit Normalization Module
//!
//! Canonicalizes unit tokens ("g" -> "grams", "tbsp" -> "tablespoons") and
//! ingredient names so that the same grocery item written in different ways
//! collapses onto one dedup key.
//!
//! ## Item name rules
//!
//! - lower-case
//! - parenthetical `(...)` and bracketed `[...]` notes removed
//! - whitespace collapsed
//! - leading descriptor words (fresh, dried, chopped, ...) removed
//! - everything after the first comma removed
//! - one trailing "s" removed (naive plural handling, "glass" becomes "glas",
//!   so "ss" words are not stable under a second pass)

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use std::collections::HashMap;

/// Descriptor words stripped from the front of an item name
pub const LEADING_DESCRIPTORS: &[&str] = &[
    "fresh", "dried", "ground", "chopped", "diced", "minced", "sliced", "whole", "organic", "raw",
];

/// Size and container words that count as part of an amount but have no synonym entry
const EXTRA_UNIT_WORDS: &[&str] = &[
    "can", "cans", "pinch", "pinches", "handful", "handfuls", "splash", "dash", "dashes", "slice",
    "slices", "bunch", "bunches", "stalk", "stalks", "head", "heads", "package", "packages", "jar",
    "jars", "sprig", "sprigs",
];

lazy_static! {
    static ref UNIT_SYNONYMS: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();

        // Weight units
        for key in ["g", "gram", "grams"] {
            map.insert(key, "grams");
        }
        for key in ["kg", "kgs", "kilogram", "kilograms"] {
            map.insert(key, "kilograms");
        }
        for key in ["oz", "ozs", "ounce", "ounces"] {
            map.insert(key, "ounces");
        }
        for key in ["lb", "lbs", "pound", "pounds"] {
            map.insert(key, "pounds");
        }

        // Volume units
        for key in ["ml", "milliliter", "milliliters", "millilitre", "millilitres"] {
            map.insert(key, "milliliters");
        }
        for key in ["l", "liter", "liters", "litre", "litres"] {
            map.insert(key, "liters");
        }
        for key in ["fl oz", "fl. oz", "fluid ounce", "fluid ounces"] {
            map.insert(key, "fluid ounces");
        }
        for key in ["cup", "cups"] {
            map.insert(key, "cups");
        }
        for key in ["tbsp", "tbs", "tablespoon", "tablespoons"] {
            map.insert(key, "tablespoons");
        }
        for key in ["tsp", "teaspoon", "teaspoons"] {
            map.insert(key, "teaspoons");
        }

        // Counts and sizes collapse to "no unit"
        for key in [
            "piece", "pieces", "whole", "unit", "units", "clove", "cloves", "large", "medium", "small",
        ] {
            map.insert(key, "");
        }

        map
    };
    static ref PARENTHETICAL: Regex = Regex::new(r"\s*\([^)]*\)").expect("valid parenthetical pattern");
    static ref BRACKETED: Regex = Regex::new(r"\s*\[[^\]]*\]").expect("valid bracket pattern");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid whitespace pattern");
    static ref LEADING_DESCRIPTOR: Regex = Regex::new(&format!(
        r"^(?:{})\s+",
        LEADING_DESCRIPTORS.join("|")
    ))
    .expect("valid descriptor pattern");
}

/// Map a unit token onto its canonical spelling
///
/// Unknown tokens come back lower-cased and trimmed but otherwise unchanged.
///
/// # Examples
///
/// ```rust
/// use meal_planner::units::normalize_unit;
///
/// assert_eq!(normalize_unit("Tbsp"), "tablespoons");
/// assert_eq!(normalize_unit("g"), "grams");
/// assert_eq!(normalize_unit("pieces"), "");
/// assert_eq!(normalize_unit("bunch"), "bunch");
/// ```
pub fn normalize_unit(unit: &str) -> String {
    let key = unit.trim().to_lowercase();
    let key = WHITESPACE.replace_all(&key, " ");
    match UNIT_SYNONYMS.get(key.as_ref()) {
        Some(canonical) => canonical.to_string(),
        None => key.into_owned(),
    }
}

/// Whether a token names a unit, a container or a size
pub fn is_unit_word(token: &str) -> bool {
    let lower = token.trim().trim_end_matches('.').to_lowercase();
    UNIT_SYNONYMS.contains_key(lower.as_str()) || EXTRA_UNIT_WORDS.contains(&lower.as_str())
}

/// Reduce an ingredient name to the key used for duplicate detection
///
/// # Examples
///
/// ```rust
/// use meal_planner::units::normalize_item_name;
///
/// assert_eq!(normalize_item_name("Fresh Basil (chopped)"), "basil");
/// assert_eq!(normalize_item_name("Onions, finely diced"), "onion");
/// assert_eq!(normalize_item_name("garlic  [to taste]"), "garlic");
/// ```
///
/// Applying it twice gives the same key, except for words ending in "ss":
/// "glass" becomes "glas", and a second pass would give "gla". Callers
/// normalize raw names once and compare the results.
pub fn normalize_item_name(name: &str) -> String {
    let mut normalized = name.to_lowercase();
    normalized = PARENTHETICAL.replace_all(&normalized, "").into_owned();
    normalized = BRACKETED.replace_all(&normalized, "").into_owned();
    normalized = WHITESPACE.replace_all(normalized.trim(), " ").into_owned();

    // Descriptors can stack ("fresh chopped parsley")
    while let Some(found) = LEADING_DESCRIPTOR.find(&normalized) {
        normalized = normalized[found.end()..].to_string();
    }

    if let Some(comma) = normalized.find(',') {
        normalized.truncate(comma);
    }
    let mut normalized = normalized.trim().to_string();

    if normalized.ends_with('s') {
        normalized.pop();
    }

    let normalized = normalized.trim().to_string();
    trace!("Normalized item name: '{}' -> '{}'", name, normalized);
    normalized
}
