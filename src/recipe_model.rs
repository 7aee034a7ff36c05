//! # Meal Plan Data Model
//!
//! This module defines the data structures exchanged between the preference
//! form, the plan generator and the grocery list.
//!
//! ## Core Concepts
//!
//! - **Preferences**: everything the household told us, fixed for one run
//! - **Recipe**: one parsed recipe, with optional categorized grocery items
//! - **WeeklyMealPlan**: day -> breakfast/lunch/dinner recipes
//! - **GroceryList**: category -> normalized grocery items
//!
//! ## Usage
//!
//! ```rust
//! use meal_planner::recipe_model::{Day, MealSelection, MealType, Preferences};
//!
//! let mut selection = MealSelection::default();
//! selection.select(Day::Monday, MealType::Dinner);
//!
//! let preferences = Preferences::default().with_meal_selection(selection);
//! assert_eq!(preferences.selected_slot_count(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::PlannerError;

/// Upper bound for each household member count
pub const MAX_HOUSEHOLD_MEMBERS: u8 = 99;

/// Day of the week, ordered Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// All days in canonical order
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Lower-case key ("monday")
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    /// Capitalized name for display ("Monday")
    pub fn display_name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    /// All meal types in the order they are generated
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Prep or cook time budget offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeBudget {
    #[serde(rename = "15")]
    Fifteen,
    #[default]
    #[serde(rename = "30")]
    Thirty,
    #[serde(rename = "45")]
    FortyFive,
    /// "60+" in the form, sent as 60 minutes
    #[serde(rename = "60")]
    SixtyPlus,
}

impl TimeBudget {
    pub fn minutes(&self) -> u32 {
        match self {
            TimeBudget::Fifteen => 15,
            TimeBudget::Thirty => 30,
            TimeBudget::FortyFive => 45,
            TimeBudget::SixtyPlus => 60,
        }
    }
}

/// Number of people eating, by age group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdSize {
    pub adults: u8,
    pub teenagers: u8,
    pub children: u8,
}

impl HouseholdSize {
    /// Create a household size, clamping each count to 0..=99 like the form does
    pub fn new(adults: u8, teenagers: u8, children: u8) -> Self {
        Self {
            adults: adults.min(MAX_HOUSEHOLD_MEMBERS),
            teenagers: teenagers.min(MAX_HOUSEHOLD_MEMBERS),
            children: children.min(MAX_HOUSEHOLD_MEMBERS),
        }
    }

    /// Total people, never less than one so recipes always serve someone
    pub fn total(&self) -> u32 {
        let total = self.adults as u32 + self.teenagers as u32 + self.children as u32;
        total.max(1)
    }
}

impl Default for HouseholdSize {
    fn default() -> Self {
        Self {
            adults: 2,
            teenagers: 0,
            children: 0,
        }
    }
}

/// Selected meals for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DaySelection {
    #[serde(default)]
    pub breakfast: bool,
    #[serde(default)]
    pub lunch: bool,
    #[serde(default)]
    pub dinner: bool,
}

impl DaySelection {
    pub fn is_selected(&self, meal: MealType) -> bool {
        match meal {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
        }
    }

    pub fn set(&mut self, meal: MealType, selected: bool) {
        match meal {
            MealType::Breakfast => self.breakfast = selected,
            MealType::Lunch => self.lunch = selected,
            MealType::Dinner => self.dinner = selected,
        }
    }
}

/// Day -> selected meals; days missing from the map have nothing selected
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealSelection(pub BTreeMap<Day, DaySelection>);

impl MealSelection {
    /// Mark one slot as selected
    pub fn select(&mut self, day: Day, meal: MealType) {
        self.0.entry(day).or_default().set(meal, true);
    }

    /// Select every slot of the week
    pub fn all() -> Self {
        let mut selection = Self::default();
        for day in Day::ALL {
            for meal in MealType::ALL {
                selection.select(day, meal);
            }
        }
        selection
    }

    pub fn is_selected(&self, day: Day, meal: MealType) -> bool {
        self.0.get(&day).is_some_and(|d| d.is_selected(meal))
    }

    /// Selected slots in canonical order: Monday breakfast first, Sunday dinner last
    pub fn selected_slots(&self) -> Vec<(Day, MealType)> {
        Day::ALL
            .iter()
            .flat_map(|day| MealType::ALL.iter().map(move |meal| (*day, *meal)))
            .filter(|(day, meal)| self.is_selected(*day, *meal))
            .collect()
    }
}

/// Household food preferences collected by the form
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Empty means no preference
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub prep_time: TimeBudget,
    #[serde(default)]
    pub cook_time: TimeBudget,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    pub pantry_items: Vec<String>,
    #[serde(default)]
    pub household_size: HouseholdSize,
    #[serde(default)]
    pub meal_selection: MealSelection,
}

impl Preferences {
    pub fn with_cuisines(mut self, cuisines: &[&str]) -> Self {
        self.cuisines = cuisines.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_allergies(mut self, allergies: &[&str]) -> Self {
        self.allergies = allergies.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_pantry_items(mut self, items: &[&str]) -> Self {
        self.pantry_items = items.iter().map(|i| i.to_string()).collect();
        self
    }

    pub fn with_meal_selection(mut self, selection: MealSelection) -> Self {
        self.meal_selection = selection;
        self
    }

    pub fn with_household_size(mut self, household_size: HouseholdSize) -> Self {
        self.household_size = household_size;
        self
    }

    /// Number of selected day/meal slots
    pub fn selected_slot_count(&self) -> usize {
        self.meal_selection.selected_slots().len()
    }

    /// Check the bounds the form enforces before a run starts
    pub fn validate(&self) -> Result<(), PlannerError> {
        let household = &self.household_size;
        for (label, count) in [
            ("adults", household.adults),
            ("teenagers", household.teenagers),
            ("children", household.children),
        ] {
            if count > MAX_HOUSEHOLD_MEMBERS {
                return Err(PlannerError::InvalidPreferences(format!(
                    "{} count {} exceeds {}",
                    label, count, MAX_HOUSEHOLD_MEMBERS
                )));
            }
        }

        if self.selected_slot_count() == 0 {
            return Err(PlannerError::InvalidPreferences(
                "no meals selected".to_string(),
            ));
        }

        Ok(())
    }
}

/// Ingredient line as written by the text generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Free-text quantity and unit, e.g. "2 cups"
    pub amount: String,
    /// Free-text item, e.g. "jasmine rice"
    pub item: String,
}

impl Ingredient {
    pub fn new(amount: &str, item: &str) -> Self {
        Self {
            amount: amount.to_string(),
            item: item.to_string(),
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.amount.is_empty() {
            write!(f, "{}", self.item)
        } else {
            write!(f, "{} {}", self.amount, self.item)
        }
    }
}

/// Grocery store section
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GroceryCategory {
    Produce,
    #[serde(rename = "Meat/Poultry/Seafood")]
    MeatPoultrySeafood,
    Dairy,
    /// Catch-all for anything not matched elsewhere
    Pantry,
}

impl GroceryCategory {
    /// Categories in display order
    pub const ALL: [GroceryCategory; 4] = [
        GroceryCategory::Produce,
        GroceryCategory::MeatPoultrySeafood,
        GroceryCategory::Dairy,
        GroceryCategory::Pantry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroceryCategory::Produce => "Produce",
            GroceryCategory::MeatPoultrySeafood => "Meat/Poultry/Seafood",
            GroceryCategory::Dairy => "Dairy",
            GroceryCategory::Pantry => "Pantry",
        }
    }

    /// Recognize a category header line ("Produce:" / "dairy")
    pub fn from_header(header: &str) -> Option<Self> {
        let name = header.trim().trim_end_matches(':').trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for GroceryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One normalized grocery entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    /// Numeric amount, already normalized ("2.00" or "3")
    pub amount: String,
    /// Canonical unit, empty for counts
    pub unit: String,
    /// Normalized base name
    pub item: String,
}

impl GroceryItem {
    pub fn new(amount: &str, unit: &str, item: &str) -> Self {
        Self {
            amount: amount.to_string(),
            unit: unit.to_string(),
            item: item.to_string(),
        }
    }

    /// Amount with the unit folded in ("2 cups", "3")
    pub fn display_amount(&self) -> String {
        if self.unit.is_empty() {
            self.amount.clone()
        } else {
            format!("{} {}", self.amount, self.unit)
        }
    }
}

impl fmt::Display for GroceryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.display_amount(), self.item)
    }
}

/// Category -> items; iteration follows the category display order
pub type GroceryList = BTreeMap<GroceryCategory, Vec<GroceryItem>>;

/// A parsed recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    /// Minutes, as written by the generator
    pub prep_time: String,
    /// Minutes, as written by the generator
    pub cook_time: String,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grocery_list: Option<GroceryList>,
}

impl Recipe {
    /// Lower-cased name, the key for duplicate detection within a run
    pub fn name_key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (prep {} min, cook {} min, serves {})",
            self.name, self.prep_time, self.cook_time, self.servings
        )
    }
}

/// Recipes for one day; only selected slots are filled
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyMeals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<Recipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<Recipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<Recipe>,
}

impl DailyMeals {
    pub fn get(&self, meal: MealType) -> Option<&Recipe> {
        match meal {
            MealType::Breakfast => self.breakfast.as_ref(),
            MealType::Lunch => self.lunch.as_ref(),
            MealType::Dinner => self.dinner.as_ref(),
        }
    }

    pub fn set(&mut self, meal: MealType, recipe: Recipe) {
        match meal {
            MealType::Breakfast => self.breakfast = Some(recipe),
            MealType::Lunch => self.lunch = Some(recipe),
            MealType::Dinner => self.dinner = Some(recipe),
        }
    }

    /// Filled slots in meal order
    pub fn meals(&self) -> impl Iterator<Item = (MealType, &Recipe)> + '_ {
        MealType::ALL
            .into_iter()
            .filter_map(move |meal| self.get(meal).map(|recipe| (meal, recipe)))
    }

    pub fn is_empty(&self) -> bool {
        self.meals().next().is_none()
    }
}

/// Day -> meals for the week
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyMealPlan(pub BTreeMap<Day, DailyMeals>);

impl WeeklyMealPlan {
    /// A plan with an empty entry for each of the seven days
    pub fn new() -> Self {
        Self(Day::ALL.into_iter().map(|day| (day, DailyMeals::default())).collect())
    }

    pub fn insert(&mut self, day: Day, meal: MealType, recipe: Recipe) {
        self.0.entry(day).or_default().set(meal, recipe);
    }

    pub fn get(&self, day: Day, meal: MealType) -> Option<&Recipe> {
        self.0.get(&day).and_then(|meals| meals.get(meal))
    }

    pub fn days(&self) -> impl Iterator<Item = (Day, &DailyMeals)> + '_ {
        self.0.iter().map(|(day, meals)| (*day, meals))
    }

    /// Every recipe in day then meal order
    pub fn recipes(&self) -> Vec<&Recipe> {
        self.0
            .values()
            .flat_map(|meals| meals.meals().map(|(_, recipe)| recipe))
            .collect()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes().len()
    }
}
