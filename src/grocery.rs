//! # Grocery Aggregation Module
//!
//! Merges the grocery items of many recipes into one shopping list grouped
//! by [`GroceryCategory`].
//!
//! Each recipe contributes its own categorized grocery list when it has one.
//! Recipes without one (fallback recipes, legacy responses) contribute their
//! ingredient lines instead: the amount goes through the amount parser, the
//! name through [`normalize_item_name`], and the category comes from fixed
//! keyword lists.
//!
//! ## Merge rules
//!
//! - items are keyed by category and normalized name
//! - the most frequent unit among an item's entries wins (first seen on ties)
//! - only entries in the winning unit are summed, others are dropped
//! - items matching a pantry entry are left out
//! - empty categories are omitted

use log::{debug, info, trace};

use crate::amount::{format_amount, parse_amount, parse_numeric_token, round2};
use crate::recipe_model::{GroceryCategory, GroceryItem, GroceryList, Recipe, WeeklyMealPlan};
use crate::units::normalize_item_name;

/// Names that contain a produce or dairy keyword but are shelf-stable
const PANTRY_OVERRIDES: &[&str] = &[
    "paste", "sauce", "powder", "canned", "broth", "stock", "oil", "vinegar", "coconut milk",
    "peanut butter", "flour", "sugar", "starch",
];

const PRODUCE_KEYWORDS: &[&str] = &[
    "tomato", "cucumber", "spinach", "onion", "basil", "garlic", "lemon", "lime", "ginger",
    "mushroom", "bell pepper", "carrot", "celery", "lettuce", "avocado", "potato", "banana",
    "apple", "berr", "green", "cilantro", "parsley", "scallion", "zucchini", "broccoli",
    "cabbage", "kale", "eggplant", "cauliflower", "mint", "herb", "squash", "orange", "mango",
    "pineapple", "jalapeno", "chili", "shallot", "leek", "asparagus", "vegetable", "salad",
    "fruit", "arugula", "bok choy",
];

const MEAT_KEYWORDS: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "turkey", "fish", "salmon", "tuna", "shrimp", "prawn",
    "bacon", "sausage", "ham", "steak", "cod", "tilapia", "crab", "duck", "anchov",
];

const DAIRY_KEYWORDS: &[&str] = &[
    "cheese", "yogurt", "yoghurt", "mozzarella", "feta", "parmesan", "cheddar", "ricotta",
    "paneer", "milk", "cream", "butter", "ghee", "egg",
];

/// Whether any word of `name` starts the keyword's word sequence
fn matches_keyword(name: &str, keyword: &str) -> bool {
    let words: Vec<&str> = name.split_whitespace().collect();
    let keyword_words: Vec<&str> = keyword.split_whitespace().collect();
    let Some((last, leading)) = keyword_words.split_last() else {
        return false;
    };

    words.windows(keyword_words.len()).any(|window| {
        let (window_last, window_leading) = match window.split_last() {
            Some(split) => split,
            None => return false,
        };
        window_leading == leading && window_last.starts_with(last)
    })
}

fn matches_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| matches_keyword(name, keyword))
}

/// Category for an ingredient name by keyword membership; Pantry is the catch-all
///
/// # Examples
///
/// ```rust
/// use meal_planner::grocery::categorize_item;
/// use meal_planner::recipe_model::GroceryCategory;
///
/// assert_eq!(categorize_item("red onions"), GroceryCategory::Produce);
/// assert_eq!(categorize_item("chicken thigh"), GroceryCategory::MeatPoultrySeafood);
/// assert_eq!(categorize_item("greek yogurt"), GroceryCategory::Dairy);
/// assert_eq!(categorize_item("tomato paste"), GroceryCategory::Pantry);
/// assert_eq!(categorize_item("jasmine rice"), GroceryCategory::Pantry);
/// ```
pub fn categorize_item(name: &str) -> GroceryCategory {
    let name = name.to_lowercase();
    let category = if matches_any(&name, PANTRY_OVERRIDES) {
        GroceryCategory::Pantry
    } else if matches_any(&name, PRODUCE_KEYWORDS) {
        GroceryCategory::Produce
    } else if matches_any(&name, MEAT_KEYWORDS) {
        GroceryCategory::MeatPoultrySeafood
    } else if matches_any(&name, DAIRY_KEYWORDS) {
        GroceryCategory::Dairy
    } else {
        GroceryCategory::Pantry
    };

    trace!("Categorized '{}' as {}", name, category);
    category
}

/// One contribution to the merged list
#[derive(Debug, Clone, PartialEq)]
struct Entry {
    category: GroceryCategory,
    name: String,
    value: f64,
    unit: String,
}

/// Grocery entries of one recipe, from its own list or derived from ingredients
///
/// A list without any items counts as missing.
fn recipe_entries(recipe: &Recipe) -> Vec<Entry> {
    let own_list = recipe
        .grocery_list
        .as_ref()
        .filter(|list| list.values().any(|items| !items.is_empty()));

    match own_list {
        Some(list) => list
            .iter()
            .flat_map(|(category, items)| {
                items.iter().map(move |item| Entry {
                    category: *category,
                    name: item.item.trim().to_lowercase(),
                    value: parse_numeric_token(item.amount.trim()),
                    unit: item.unit.trim().to_string(),
                })
            })
            .filter(|entry| !entry.name.is_empty())
            .collect(),
        None => recipe
            .ingredients
            .iter()
            .filter_map(|ingredient| {
                let name = normalize_item_name(&ingredient.item);
                if name.is_empty() {
                    return None;
                }
                let amount = parse_amount(&ingredient.amount);
                Some(Entry {
                    category: categorize_item(&name),
                    name,
                    value: amount.value,
                    unit: amount.unit,
                })
            })
            .collect(),
    }
}

/// The unit used by most entries, earliest on ties
fn dominant_unit<'a>(units: &[&'a str]) -> &'a str {
    let mut best: Option<(&str, usize)> = None;
    for unit in units {
        let count = units.iter().filter(|u| *u == unit).count();
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((*unit, count));
        }
    }
    best.map(|(unit, _)| unit).unwrap_or("")
}

fn is_pantry_item(name: &str, pantry: &[String]) -> bool {
    pantry.iter().any(|pantry_item| name.contains(pantry_item.as_str()))
}

/// Merge the grocery items of `recipes`, leaving out pantry items
///
/// # Examples
///
/// ```rust
/// use meal_planner::fallback::fallback_recipe;
/// use meal_planner::grocery::aggregate;
/// use meal_planner::recipe_model::{GroceryCategory, MealType};
///
/// let recipes = vec![
///     fallback_recipe(MealType::Dinner, "Thai"),
///     fallback_recipe(MealType::Dinner, "Greek"),
/// ];
/// let list = aggregate(&recipes, &["soy sauce".to_string()]);
///
/// let dairy = &list[&GroceryCategory::Dairy];
/// assert_eq!(dairy[0].item, "egg");
/// assert_eq!(dairy[0].amount, "4");
/// assert!(list.values().flatten().all(|item| item.item != "soy sauce"));
/// ```
pub fn aggregate(recipes: &[Recipe], pantry_items: &[String]) -> GroceryList {
    let pantry: Vec<String> = pantry_items
        .iter()
        .map(|item| normalize_item_name(item))
        .filter(|item| !item.is_empty())
        .collect();

    // (category, name) groups in first-seen order
    let mut groups: Vec<(GroceryCategory, String, Vec<(f64, String)>)> = Vec::new();
    let mut excluded = 0usize;
    for entry in recipes.iter().flat_map(recipe_entries) {
        if is_pantry_item(&entry.name, &pantry) {
            excluded += 1;
            continue;
        }
        match groups
            .iter_mut()
            .find(|(category, name, _)| *category == entry.category && *name == entry.name)
        {
            Some((_, _, amounts)) => amounts.push((entry.value, entry.unit)),
            None => groups.push((entry.category, entry.name, vec![(entry.value, entry.unit)])),
        }
    }

    let mut list = GroceryList::new();
    for (category, name, amounts) in groups {
        let units: Vec<&str> = amounts.iter().map(|(_, unit)| unit.as_str()).collect();
        let unit = dominant_unit(&units);
        let total = amounts
            .iter()
            .filter(|(_, u)| u == unit)
            .map(|(value, _)| value)
            .sum::<f64>();

        let dropped = amounts.len() - amounts.iter().filter(|(_, u)| u == unit).count();
        if dropped > 0 {
            debug!(
                "Dropped {} '{}' amounts not in '{}' while merging",
                dropped, name, unit
            );
        }

        list.entry(category)
            .or_default()
            .push(GroceryItem::new(&format_amount(round2(total)), unit, &name));
    }
    list.retain(|_, items| !items.is_empty());

    info!(
        "Aggregated {} recipes into {} grocery items ({} pantry items excluded)",
        recipes.len(),
        list.values().map(Vec::len).sum::<usize>(),
        excluded
    );
    list
}

/// Merge every recipe of a plan
pub fn aggregate_plan(plan: &WeeklyMealPlan, pantry_items: &[String]) -> GroceryList {
    let recipes: Vec<Recipe> = plan.recipes().into_iter().cloned().collect();
    aggregate(&recipes, pantry_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::Ingredient;

    #[test]
    fn test_keyword_matching_is_word_based() {
        assert!(matches_keyword("bell pepper", "bell pepper"));
        assert!(!matches_keyword("black pepper", "bell pepper"));
        assert!(matches_keyword("cherry tomatoe", "tomato"));
        assert!(!matches_keyword("chickpea", "pea"));
        assert!(!matches_keyword("", "egg"));
    }

    #[test]
    fn test_categorize_overrides() {
        assert_eq!(categorize_item("garlic powder"), GroceryCategory::Pantry);
        assert_eq!(categorize_item("coconut milk"), GroceryCategory::Pantry);
        assert_eq!(categorize_item("vegetable broth"), GroceryCategory::Pantry);
        assert_eq!(categorize_item("eggplant"), GroceryCategory::Produce);
        assert_eq!(categorize_item("egg"), GroceryCategory::Dairy);
        assert_eq!(categorize_item("fish"), GroceryCategory::MeatPoultrySeafood);
    }

    #[test]
    fn test_dominant_unit_ties_go_to_first() {
        assert_eq!(dominant_unit(&["cups", "grams"]), "cups");
        assert_eq!(dominant_unit(&["cups", "grams", "grams"]), "grams");
        assert_eq!(dominant_unit(&[]), "");
    }

    #[test]
    fn test_derived_entries() {
        let recipe = Recipe {
            name: "Test".to_string(),
            prep_time: "5".to_string(),
            cook_time: "5".to_string(),
            servings: 2,
            ingredients: vec![
                Ingredient::new("1/2 cup", "Fresh Basil (torn)"),
                Ingredient::new("a pinch", "salt"),
            ],
            steps: vec![],
            grocery_list: None,
        };

        let entries = recipe_entries(&recipe);
        assert_eq!(entries[0].name, "basil");
        assert_eq!(entries[0].value, 0.5);
        assert_eq!(entries[0].unit, "cups");
        assert_eq!(entries[0].category, GroceryCategory::Produce);
        assert_eq!(entries[1].value, 1.0);
        assert_eq!(entries[1].category, GroceryCategory::Pantry);
    }
}
