//! # Recipe Text Parser
//!
//! This module turns one raw text response from the generation service into
//! a structured [`Recipe`]. The response is expected to follow the labeled
//! layout requested by the prompt builder:
//!
//! ```text
//! Name: Simple Tomato Pasta
//! Prep Time: 10
//! Cook Time: 20
//! Servings: 4
//! Ingredients:
//! - 2 cups pasta
//! Steps:
//! 1. Boil pasta
//! Grocery List:
//! Pantry:
//! - 2 cups pasta
//! ```
//!
//! ## Pipeline
//!
//! 1. **Cleanup**: line endings, code fences, outer whitespace
//! 2. **Section split**: labeled scalar lines, then the text between section markers
//! 3. **Line classification**: bullet lines for ingredients and grocery items, numbered lines for steps
//! 4. **Token classification**: split each ingredient line into amount and item
//!
//! ## Usage
//!
//! ```rust
//! use meal_planner::recipe_parser::{is_valid_recipe, RecipeTextParser};
//!
//! let text = "Name: Oat Bowl\nPrep Time: 5\nCook Time: 5\nServings: 2\n\
//!             Ingredients:\n- 1 cup oats\n- 1 banana\n- 1 tbsp honey\n\
//!             Steps:\n1. Cook oats\n2. Add toppings";
//!
//! let recipe = RecipeTextParser::lenient().parse(text).unwrap();
//! assert_eq!(recipe.name, "Oat Bowl");
//! assert!(is_valid_recipe(&recipe));
//! ```

use lazy_static::lazy_static;
use log::{debug, info, trace, warn};
use regex::Regex;

use crate::amount::{format_decimal, parse_numeric_token, round2};
use crate::errors::ParseError;
use crate::recipe_model::{GroceryCategory, GroceryItem, GroceryList, Ingredient, Recipe};
use crate::units::{is_unit_word, normalize_item_name, normalize_unit};

// Section markers shared with the prompt builder
pub const NAME_LABEL: &str = "Name:";
pub const PREP_TIME_LABEL: &str = "Prep Time:";
pub const COOK_TIME_LABEL: &str = "Cook Time:";
pub const SERVINGS_LABEL: &str = "Servings:";
pub const INGREDIENTS_MARKER: &str = "Ingredients:";
pub const STEPS_MARKER: &str = "Steps:";
pub const GROCERY_LIST_MARKER: &str = "Grocery List:";

/// Name used when the response carries no "Name:" line; never valid
pub const PLACEHOLDER_NAME: &str = "Recipe Name";
pub const DEFAULT_MINUTES: &str = "15";
pub const DEFAULT_SERVINGS: u32 = 4;

pub const MIN_INGREDIENTS: usize = 3;
pub const MIN_STEPS: usize = 2;

/// Spelled-out quantities accepted inside an amount
const NUMBER_WORDS: &[&str] = &["one", "two", "three", "four", "five"];
/// Words that may sit inside an amount ("a pinch", "to taste")
const FILLER_WORDS: &[&str] = &["a", "an", "to", "taste"];

lazy_static! {
    static ref NAME_LINE: Regex = label_regex(r"name", r"(.+?)[ \t*]*$");
    static ref PREP_TIME_LINE: Regex = label_regex(r"prep[ \t]*time", r"[^\d\n]*(\d+)");
    static ref COOK_TIME_LINE: Regex = label_regex(r"cook[ \t]*time", r"[^\d\n]*(\d+)");
    static ref SERVINGS_LINE: Regex = label_regex(r"servings", r"(.*)$");
    static ref FIRST_INTEGER: Regex = Regex::new(r"\d+").expect("valid integer pattern");
    static ref BULLET_LINE: Regex = Regex::new(r"^(?:-|\d+\.)\s*").expect("valid bullet pattern");
    static ref NUMBERED_LINE: Regex = Regex::new(r"^\d+\.\s*").expect("valid numbered pattern");
    static ref NUMERIC_TOKEN: Regex = Regex::new(
        r"^(?:\d+(?:[./]\d+)*(?:[-–]\d+(?:[./]\d+)*)?|[½⅓⅔¼¾⅛])$"
    )
    .expect("valid numeric token pattern");
    static ref GROCERY_LINE: Regex = Regex::new(r"^([\d./]+)\s*(.*)$").expect("valid grocery pattern");
}

/// Case-insensitive "Label: value" line, tolerant of markdown bullets and bold markers
fn label_regex(label: &str, value: &str) -> Regex {
    Regex::new(&format!(r"(?im)^[ \t>#*-]*{label}[ \t]*:[ \t*]*{value}"))
        .expect("Label pattern should be valid")
}

/// Parser for generation-service responses
///
/// The lenient parser fills missing scalar fields with defaults; the strict
/// parser refuses a response without a serving size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeTextParser {
    require_servings: bool,
}

impl RecipeTextParser {
    /// Parser that defaults a missing "Servings:" line to 4
    pub fn lenient() -> Self {
        Self {
            require_servings: false,
        }
    }

    /// Parser that fails when "Servings:" is missing or unreadable
    pub fn strict() -> Self {
        Self {
            require_servings: true,
        }
    }

    /// Parse one raw response into a recipe
    ///
    /// Fails only when the ingredients or steps section is structurally
    /// absent, or (strict) when the serving size is missing. Everything else
    /// is best-effort; call [`is_valid_recipe`] on the result.
    pub fn parse(&self, raw_text: &str) -> Result<Recipe, ParseError> {
        let text = clean_response(raw_text);
        debug!("Parsing recipe response with {} lines", text.lines().count());

        let name = NAME_LINE
            .captures(&text)
            .map(|c| strip_markdown(&c[1]))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| {
                warn!("Recipe response has no '{}' line", NAME_LABEL);
                PLACEHOLDER_NAME.to_string()
            });
        let prep_time = PREP_TIME_LINE
            .captures(&text)
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| DEFAULT_MINUTES.to_string());
        let cook_time = COOK_TIME_LINE
            .captures(&text)
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| DEFAULT_MINUTES.to_string());
        let servings = self.parse_servings(&text)?;

        let ingredients_section = section_between(&text, INGREDIENTS_MARKER, &[STEPS_MARKER])
            .ok_or(ParseError::MissingSection(INGREDIENTS_MARKER))?;
        let steps_section = section_between(&text, STEPS_MARKER, &[GROCERY_LIST_MARKER])
            .ok_or(ParseError::MissingSection(STEPS_MARKER))?;

        let ingredients = parse_ingredients(ingredients_section);
        let steps = parse_steps(steps_section);
        let grocery_list = match section_between(&text, GROCERY_LIST_MARKER, &[])
            .map(parse_grocery_section)
        {
            Some(list) if list.is_empty() => {
                warn!("Grocery list section had no usable items, ignoring it");
                None
            }
            other => other,
        };

        info!(
            "Parsed recipe '{}': {} ingredients, {} steps, grocery list: {}",
            name,
            ingredients.len(),
            steps.len(),
            grocery_list.is_some()
        );

        Ok(Recipe {
            name,
            prep_time,
            cook_time,
            servings,
            ingredients,
            steps,
            grocery_list,
        })
    }

    fn parse_servings(&self, text: &str) -> Result<u32, ParseError> {
        let Some(captures) = SERVINGS_LINE.captures(text) else {
            if self.require_servings {
                return Err(ParseError::MissingServings);
            }
            return Ok(DEFAULT_SERVINGS);
        };

        let value = captures[1].trim();
        match FIRST_INTEGER.find(value).and_then(|m| m.as_str().parse::<u32>().ok()) {
            Some(servings) => Ok(servings),
            None if self.require_servings => Err(ParseError::InvalidServings(value.to_string())),
            None => {
                warn!("Unreadable serving size '{}', using {}", value, DEFAULT_SERVINGS);
                Ok(DEFAULT_SERVINGS)
            }
        }
    }
}

impl Default for RecipeTextParser {
    fn default() -> Self {
        Self::lenient()
    }
}

/// Normalize line endings, drop code-fence lines and trim
fn clean_response(raw_text: &str) -> String {
    raw_text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Remove markdown emphasis left around a captured value
fn strip_markdown(value: &str) -> String {
    value.trim().trim_matches(|c| c == '*' || c == '_').trim().to_string()
}

/// Text after `marker` up to the first of `end_markers`, case-insensitive
///
/// Returns `None` when `marker` does not occur at all.
fn section_between<'a>(text: &'a str, marker: &str, end_markers: &[&str]) -> Option<&'a str> {
    // ASCII lowering keeps byte offsets aligned with `text`
    let lower = text.to_ascii_lowercase();
    let start = lower.find(&marker.to_ascii_lowercase())? + marker.len();

    let end = end_markers
        .iter()
        .filter_map(|end_marker| lower[start..].find(&end_marker.to_ascii_lowercase()))
        .min()
        .map(|offset| start + offset)
        .unwrap_or(text.len());

    trace!("Section '{}' spans bytes {}..{}", marker, start, end);
    Some(&text[start..end])
}

/// Bulleted ingredient lines split into amount and item
fn parse_ingredients(section: &str) -> Vec<Ingredient> {
    section
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('-') || NUMBERED_LINE.is_match(line))
        .map(|line| BULLET_LINE.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .map(|line| split_ingredient_line(&line))
        .collect()
}

/// Numbered step lines with the numbering removed
fn parse_steps(section: &str) -> Vec<String> {
    section
        .lines()
        .map(str::trim)
        .filter(|line| NUMBERED_LINE.is_match(line))
        .map(|line| NUMBERED_LINE.replace(line, "").trim().to_string())
        .filter(|step| !step.is_empty())
        .collect()
}

/// Whether a token belongs to the amount part of an ingredient line
fn is_amount_token(token: &str) -> bool {
    let lower = token.to_lowercase();
    NUMERIC_TOKEN.is_match(&lower)
        || is_unit_word(&lower)
        || NUMBER_WORDS.contains(&lower.as_str())
        || FILLER_WORDS.contains(&lower.as_str())
}

/// Split a cleaned ingredient line into amount and item
///
/// Tokens are consumed into the amount while they look like numbers, units,
/// small number words or filler words; the rest is the item.
///
/// # Examples
///
/// ```rust
/// use meal_planner::recipe_parser::split_ingredient_line;
///
/// let ingredient = split_ingredient_line("2 cups jasmine rice");
/// assert_eq!(ingredient.amount, "2 cups");
/// assert_eq!(ingredient.item, "jasmine rice");
///
/// let ingredient = split_ingredient_line("a pinch of salt");
/// assert_eq!(ingredient.amount, "a pinch");
/// assert_eq!(ingredient.item, "salt");
/// ```
pub fn split_ingredient_line(line: &str) -> Ingredient {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let amount_len = tokens
        .iter()
        .position(|token| !is_amount_token(token))
        .unwrap_or(tokens.len());

    let (amount, item) = if amount_len > 0 {
        let item = tokens[amount_len..].join(" ");
        let item = strip_leading_of(&item);
        if item.is_empty() {
            // Nothing but amount words, keep the whole line as the item
            (tokens[..amount_len].join(" "), line.trim().to_string())
        } else {
            (tokens[..amount_len].join(" "), item)
        }
    } else if tokens.len() > 1 {
        trace!("No amount tokens in '{}', splitting on first token", line);
        (tokens[0].to_string(), tokens[1..].join(" "))
    } else {
        ("1".to_string(), line.trim().to_string())
    };

    trace!("Split ingredient line '{}' -> amount='{}', item='{}'", line, amount, item);
    Ingredient { amount, item }
}

fn strip_leading_of(item: &str) -> String {
    let trimmed = item.trim();
    match trimmed.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("of ") => trimmed[3..].trim_start().to_string(),
        _ => trimmed.to_string(),
    }
}

/// Parse the body of a "Grocery List:" section
///
/// Header lines ending in ':' switch category; only Produce,
/// Meat/Poultry/Seafood, Dairy and Pantry are recognized and lines under any
/// other header are dropped. Items are merged within a category by
/// normalized name, summing amounts and keeping the first unit seen.
pub fn parse_grocery_section(section: &str) -> GroceryList {
    let mut entries: Vec<(GroceryCategory, f64, String, String)> = Vec::new();
    let mut current: Option<GroceryCategory> = None;

    for line in section.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let unformatted = line.trim_matches(|c| c == '*' || c == '#').trim();
        if unformatted.ends_with(':') {
            current = GroceryCategory::from_header(unformatted);
            if current.is_none() {
                debug!("Dropping items under unrecognized grocery category '{}'", unformatted);
            }
            continue;
        }

        let Some(category) = current else {
            continue;
        };
        let Some(body) = line.strip_prefix('-') else {
            continue;
        };

        match parse_grocery_line(body.trim()) {
            Some((value, unit, item)) => entries.push((category, value, unit, item)),
            None => trace!("Skipping grocery line '{}'", line),
        }
    }

    let mut list = GroceryList::new();
    let mut totals: Vec<(GroceryCategory, String, f64, String)> = Vec::new();
    for (category, value, unit, item) in entries {
        match totals
            .iter_mut()
            .find(|(c, name, _, _)| *c == category && *name == item)
        {
            Some(existing) => existing.2 = round2(existing.2 + value),
            None => totals.push((category, item, value, unit)),
        }
    }

    for (category, item, value, unit) in totals {
        list.entry(category)
            .or_default()
            .push(GroceryItem::new(&format_decimal(value), &unit, &item));
    }
    list.retain(|_, items| !items.is_empty());

    debug!(
        "Parsed grocery list with {} categories, {} items",
        list.len(),
        list.values().map(Vec::len).sum::<usize>()
    );
    list
}

/// "2 cups pasta" -> (2.0, "cups", "pasta"); `None` for non-positive amounts or empty items
fn parse_grocery_line(body: &str) -> Option<(f64, String, String)> {
    let captures = GROCERY_LINE.captures(body)?;
    let value = parse_numeric_token(&captures[1]);
    if value <= 0.0 {
        return None;
    }

    let rest: Vec<&str> = captures[2].split_whitespace().collect();
    let (unit, item_start) = match rest.as_slice() {
        [first, second, ..] if is_unit_word(&format!("{first} {second}")) => {
            (normalize_unit(&format!("{first} {second}")), 2)
        }
        [first, ..] if is_unit_word(first) => (normalize_unit(first.trim_end_matches('.')), 1),
        _ => (String::new(), 0),
    };

    let item = normalize_item_name(&strip_leading_of(&rest[item_start.min(rest.len())..].join(" ")));
    if item.is_empty() {
        return None;
    }
    Some((value, unit, item))
}

/// Why a recipe is unusable, or `None` when it passes every check
pub fn validation_problem(recipe: &Recipe) -> Option<String> {
    let name = recipe.name.trim();
    if name.is_empty() {
        return Some("recipe name is empty".to_string());
    }
    if name == PLACEHOLDER_NAME {
        return Some("recipe name is a placeholder".to_string());
    }
    if name.contains('[') {
        return Some(format!("recipe name contains a template placeholder: {name}"));
    }
    if recipe.ingredients.len() < MIN_INGREDIENTS {
        return Some(format!(
            "only {} ingredients (need at least {})",
            recipe.ingredients.len(),
            MIN_INGREDIENTS
        ));
    }
    if recipe.steps.len() < MIN_STEPS {
        return Some(format!(
            "only {} steps (need at least {})",
            recipe.steps.len(),
            MIN_STEPS
        ));
    }
    if recipe.servings == 0 {
        return Some("servings must be positive".to_string());
    }
    if let Some(ingredient) = recipe
        .ingredients
        .iter()
        .find(|ing| ing.item.contains('[') || ing.amount.contains('['))
    {
        return Some(format!("ingredient contains a template placeholder: {ingredient}"));
    }
    None
}

/// Whether a parsed recipe is complete enough to show
pub fn is_valid_recipe(recipe: &Recipe) -> bool {
    validation_problem(recipe).is_none()
}
