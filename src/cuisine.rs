//! # Cuisine Rotation Module
//!
//! Chooses the cuisine for the next recipe request so a week of meals is
//! spread across cuisines instead of repeating one.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// Rotation used when the household picked no cuisine
pub const MASTER_CUISINES: [&str; 15] = [
    "Italian",
    "Mexican",
    "Chinese",
    "Japanese",
    "Indian",
    "Thai",
    "French",
    "Greek",
    "Spanish",
    "Korean",
    "Vietnamese",
    "Mediterranean",
    "American",
    "Lebanese",
    "Moroccan",
];

/// How many recipes each cuisine has produced in the current run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CuisineUsage {
    counts: HashMap<String, u32>,
}

impl CuisineUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, cuisine: &str) -> u32 {
        self.counts.get(cuisine).copied().unwrap_or(0)
    }

    pub fn record(&mut self, cuisine: &str) {
        *self.counts.entry(cuisine.to_string()).or_insert(0) += 1;
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

/// Least-used candidate, earliest in list order on ties
fn least_used<'a, I>(candidates: I, usage: &CuisineUsage) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .min_by_key(|cuisine| usage.count(cuisine))
}

/// Pick the target cuisine for the next slot
///
/// - nothing selected: least-used entry of [`MASTER_CUISINES`]
/// - one selected: always that cuisine
/// - several selected: least-used among them
///
/// # Examples
///
/// ```rust
/// use meal_planner::cuisine::{pick_cuisine, CuisineUsage};
///
/// let selected = vec!["Thai".to_string(), "Greek".to_string()];
/// let mut usage = CuisineUsage::new();
///
/// assert_eq!(pick_cuisine(&selected, &usage), "Thai");
/// usage.record("Thai");
/// assert_eq!(pick_cuisine(&selected, &usage), "Greek");
/// ```
pub fn pick_cuisine(selected: &[String], usage: &CuisineUsage) -> String {
    let picked = match selected {
        [] => least_used(MASTER_CUISINES, usage),
        [only] => Some(only.as_str()),
        many => least_used(many.iter().map(String::as_str), usage),
    }
    .unwrap_or(MASTER_CUISINES[0]);

    debug!(
        "Picked cuisine '{}' (used {} times so far)",
        picked,
        usage.count(picked)
    );
    picked.to_string()
}

/// Random cuisine other than `current` for a duplicate-name retry
///
/// Draws from the selected cuisines, or from [`MASTER_CUISINES`] when
/// nothing was selected. Returns `current` when no other candidate exists.
pub fn pick_alternate_cuisine<R>(selected: &[String], current: &str, rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let pool: Vec<&str> = if selected.is_empty() {
        MASTER_CUISINES.to_vec()
    } else {
        selected.iter().map(String::as_str).collect()
    };

    let remaining: Vec<&str> = pool
        .into_iter()
        .filter(|cuisine| !cuisine.eq_ignore_ascii_case(current))
        .collect();

    let alternate = remaining.choose(rng).copied().unwrap_or(current);
    debug!("Alternate cuisine for retry: '{}' -> '{}'", current, alternate);
    alternate.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(cuisines: &[&str]) -> Vec<String> {
        cuisines.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_single_cuisine_is_always_used() {
        let selected = names(&["Korean"]);
        let mut usage = CuisineUsage::new();
        for _ in 0..5 {
            assert_eq!(pick_cuisine(&selected, &usage), "Korean");
            usage.record("Korean");
        }
    }

    #[test]
    fn test_multiple_cuisines_balance_usage() {
        let selected = names(&["Thai", "Greek", "Mexican"]);
        let mut usage = CuisineUsage::new();

        let mut picks = Vec::new();
        for _ in 0..6 {
            let cuisine = pick_cuisine(&selected, &usage);
            usage.record(&cuisine);
            picks.push(cuisine);
        }

        assert_eq!(picks, names(&["Thai", "Greek", "Mexican", "Thai", "Greek", "Mexican"]));
    }

    #[test]
    fn test_no_selection_rotates_master_list() {
        let mut usage = CuisineUsage::new();
        let mut picks = Vec::new();
        for _ in 0..MASTER_CUISINES.len() {
            let cuisine = pick_cuisine(&[], &usage);
            usage.record(&cuisine);
            picks.push(cuisine);
        }

        assert_eq!(picks, names(&MASTER_CUISINES));
        assert_eq!(pick_cuisine(&[], &usage), MASTER_CUISINES[0]);
    }

    #[test]
    fn test_alternate_excludes_current() {
        let selected = names(&["Thai", "Greek", "Mexican"]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let alternate = pick_alternate_cuisine(&selected, "Thai", &mut rng);
            assert_ne!(alternate, "Thai");
            assert!(selected.contains(&alternate));
        }
    }

    #[test]
    fn test_alternate_keeps_current_when_alone() {
        let mut rng = StdRng::seed_from_u64(7);
        let selected = names(&["Thai"]);
        assert_eq!(pick_alternate_cuisine(&selected, "Thai", &mut rng), "Thai");
    }

    #[test]
    fn test_alternate_without_selection_uses_master_list() {
        let mut rng = StdRng::seed_from_u64(11);
        let alternate = pick_alternate_cuisine(&[], "Italian", &mut rng);
        assert_ne!(alternate, "Italian");
        assert!(MASTER_CUISINES.contains(&alternate.as_str()));
    }
}
