//! # Prompt Builder Module
//!
//! Builds the instruction text sent to the generation service. One base
//! block is built per plan from the household's preferences and shared by
//! every slot; a short addendum names the meal type and target cuisine of
//! each individual request.
//!
//! The response layout requested here is a contract with
//! [`crate::recipe_parser`]: both sides use the same marker constants.

use crate::recipe_model::{HouseholdSize, MealType, Preferences, TimeBudget};
use crate::recipe_parser::{
    COOK_TIME_LABEL, GROCERY_LIST_MARKER, INGREDIENTS_MARKER, NAME_LABEL, PREP_TIME_LABEL,
    SERVINGS_LABEL, STEPS_MARKER,
};

/// Appended to the meal addendum when a duplicate recipe name is retried
pub const RETRY_INSTRUCTION: &str =
    "Create a completely different recipe with a unique name and ingredients.";

const NUTRITION_REQUIREMENTS: &str = "Important requirements for healthy, balanced meals:
- Nutritional balance requirements:
  * Include vegetables or fruits in each meal if possible
  * Limit added sugars and processed ingredients
  * Include healthy fats (olive oil, avocado, nuts, etc.)
- Cooking methods:
  * Prioritize healthy cooking methods:
    - Steaming
    - Baking
    - Grilling
    - Light sautéing
  * Minimize use of added fats/oils (1-2 tbsp max)
  * No deep frying
- Seasoning guidelines:
  * Use herbs and spices for flavor instead of excess salt
  * Limit sodium content
  * Use natural flavor enhancers (citrus, herbs, garlic, ginger)";

const BEGINNER_REQUIREMENTS: &str = "Important requirements for beginner-friendly cooking:
- Use only these basic cooking techniques:
  * Boiling/simmering (pasta, rice, vegetables)
  * Basic sautéing/stir-frying in a pan
  * Simple baking (one pan/dish in oven)
  * Basic chopping and mixing
- Avoid these complex techniques:
  * Deep frying
  * Multiple cooking methods per recipe
  * Precise temperature control
  * Complex sauce-making
  * Multi-step preparations
- Equipment requirements:
  * Only use basic kitchen tools: pot, pan, baking dish
  * No food processor, blender, or special equipment
  * Minimal number of pots/pans (ideally just 1-2)
- Recipe structure:
  * Maximum 6-8 ingredients total
  * 3-5 simple, clear steps
  * Each step should be a single action
  * No concurrent tasks or timing-sensitive steps
  * Ingredients should be common supermarket items";

const DIVERSITY_REQUIREMENTS: &str = "Important requirements for cuisine diversity:
- Create an authentic but simplified version of the cuisine
- Focus on the most basic, popular dishes from the cuisine
- Use readily available ingredients as substitutes when needed
- Ensure the recipe name reflects its cultural origin
- Make each recipe distinct from others in the meal plan";

const GROCERY_LIST_RULES: &str = "Strict rules for the grocery list:
- Units: use only grams, kilograms, ounces, pounds, milliliters, liters, cups, tablespoons, teaspoons, or no unit at all
- Whole items (onions, eggs, lemons, garlic cloves, cans) are counted, never weighed: write \"- 2 onion\", not \"- 300 grams onion\"
- Amounts are plain decimal numbers (0.5, 1.25), never fractions or ranges
- Item names are the simple base ingredient: singular, lower-case, with no preparation notes, brand names or parentheses
- Group every item under exactly one of these categories, written as a header line ending in a colon:
  Produce:
  Meat/Poultry/Seafood:
  Dairy:
  Pantry:
- List each ingredient once; if it appears twice in the recipe, combine the amounts into one line
- Leave out categories that have no items";

const GROCERY_LIST_EXAMPLE: &str = "Example grocery list:
Produce:
- 2 onion
- 3 garlic
- 0.5 cups cilantro
Meat/Poultry/Seafood:
- 500 grams chicken thigh
Dairy:
- 1 cups yogurt
Pantry:
- 1 cups rice
- 2 tablespoons olive oil";

/// Builds prompt text for one plan-generation run
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    cuisines: Vec<String>,
    prep_time: TimeBudget,
    cook_time: TimeBudget,
    allergies: Vec<String>,
    dietary_preferences: Vec<String>,
    pantry_items: Vec<String>,
    household_size: HouseholdSize,
    include_grocery_list: bool,
}

impl PromptBuilder {
    /// Capture the preferences a prompt depends on; the grocery-list block is on
    pub fn new(preferences: &Preferences) -> Self {
        Self {
            cuisines: preferences.cuisines.clone(),
            prep_time: preferences.prep_time,
            cook_time: preferences.cook_time,
            allergies: preferences.allergies.clone(),
            dietary_preferences: preferences.dietary_preferences.clone(),
            pantry_items: preferences.pantry_items.clone(),
            household_size: preferences.household_size,
            include_grocery_list: true,
        }
    }

    /// Toggle the categorized grocery-list section of the response format
    pub fn with_grocery_list(mut self, include: bool) -> Self {
        self.include_grocery_list = include;
        self
    }

    /// The shared instruction block for every slot of the plan
    pub fn base_prompt(&self) -> String {
        let mut prompt = String::from(
            "As a professional chef and nutritionist, create a healthy, well-balanced, \
             beginner-friendly recipe following these requirements:\n",
        );

        if self.cuisines.is_empty() {
            prompt.push_str("- Create a recipe from any cuisine type\n");
        } else {
            prompt.push_str(&format!(
                "- Choose from these cuisines: {}\n",
                self.cuisines.join(", ")
            ));
        }
        prompt.push_str(&format!(
            "- Maximum prep time: {} minutes\n",
            self.prep_time.minutes()
        ));
        prompt.push_str(&format!(
            "- Maximum cook time: {} minutes\n",
            self.cook_time.minutes()
        ));
        if !self.allergies.is_empty() {
            prompt.push_str(&format!(
                "- Avoid these ingredients: {}\n",
                self.allergies.join(", ")
            ));
        }
        if !self.dietary_preferences.is_empty() {
            prompt.push_str(&format!(
                "- Follow these dietary preferences: {}\n",
                self.dietary_preferences.join(", ")
            ));
        }
        if !self.pantry_items.is_empty() {
            prompt.push_str(&format!(
                "- Use these pantry items when possible: {}\n\
                 - Minimize additional spices and sauces beyond what's in the pantry\n\
                 - If using additional spices/sauces, limit to 1-2 new items maximum\n\
                 - Prioritize using the provided pantry items for seasoning and flavoring\n",
                self.pantry_items.join(", ")
            ));
        }
        prompt.push_str(&self.household_line());

        prompt.push('\n');
        prompt.push_str(NUTRITION_REQUIREMENTS);
        prompt.push_str("\n\n");
        prompt.push_str(BEGINNER_REQUIREMENTS);
        prompt.push_str("\n\n");
        prompt.push_str(DIVERSITY_REQUIREMENTS);
        prompt.push_str("\n\n");
        prompt.push_str(&self.format_block());

        if self.include_grocery_list {
            prompt.push_str("\n\n");
            prompt.push_str(GROCERY_LIST_RULES);
            prompt.push_str("\n\n");
            prompt.push_str(GROCERY_LIST_EXAMPLE);
        }

        prompt.push_str(
            "\n\nMake it suitable for busy weeknight cooking with minimal kitchen experience.",
        );
        prompt
    }

    fn household_line(&self) -> String {
        let household = &self.household_size;
        let mut line = format!(
            "- Scale the recipe to serve {} people",
            household.total()
        );

        let mut groups = Vec::new();
        if household.teenagers > 0 {
            groups.push(format!("{} teenagers (adult portions)", household.teenagers));
        }
        if household.children > 0 {
            groups.push(format!("{} children (smaller portions)", household.children));
        }
        if !groups.is_empty() {
            line.push_str(&format!(
                ", including {} adults, {}",
                household.adults,
                groups.join(" and ")
            ));
        }
        line.push('\n');
        line
    }

    /// The literal response layout, labels in parse order
    fn format_block(&self) -> String {
        let mut block = format!(
            "Generate a complete recipe in this format (do not use placeholders, generate actual values):\n\n\
             {NAME_LABEL} (generate a specific recipe name that reflects the cuisine)\n\
             {PREP_TIME_LABEL} (number of minutes)\n\
             {COOK_TIME_LABEL} (number of minutes)\n\
             {SERVINGS_LABEL} {servings}\n\n\
             {INGREDIENTS_MARKER}\n\
             - 2 cups rice\n\
             - 1 pound chicken\n\
             - 3 cloves garlic\n\
             (list 6-8 common ingredients with amounts)\n\n\
             {STEPS_MARKER}\n\
             1. Rinse the rice and bring it to a boil\n\
             2. Season the chicken with salt and pepper\n\
             (list 3-5 simple, single-action steps)",
            servings = self.household_size.total()
        );

        if self.include_grocery_list {
            block.push_str(&format!(
                "\n\n{GROCERY_LIST_MARKER}\n\
                 (every ingredient above, grouped by category, following the rules below)"
            ));
        }
        block
    }

    /// Per-request addendum naming the meal and cuisine
    pub fn meal_context(&self, meal: MealType, cuisine: &str) -> String {
        format!(
            "Create a {meal} recipe specifically from {cuisine} cuisine.\n\
             Important: This should be an authentic {cuisine} dish commonly eaten for {meal}.\n\
             Make sure the recipe name, ingredients, and cooking methods are authentic to {cuisine} cuisine.",
            meal = meal.as_str()
        )
    }

    /// Addendum used when the first attempt repeated an earlier recipe name
    pub fn retry_context(&self, meal: MealType, cuisine: &str) -> String {
        format!("{}\n{}", self.meal_context(meal, cuisine), RETRY_INSTRUCTION)
    }

    /// Base block followed by the meal addendum
    pub fn full_prompt(&self, meal: MealType, cuisine: &str, retry: bool) -> String {
        let context = if retry {
            self.retry_context(meal, cuisine)
        } else {
            self.meal_context(meal, cuisine)
        };
        format!("{}\n\n{}", self.base_prompt(), context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("'{}' missing from prompt", needle))
    }

    #[test]
    fn test_labels_appear_in_parse_order() {
        let prompt = PromptBuilder::new(&Preferences::default()).base_prompt();

        let labels = [
            NAME_LABEL,
            PREP_TIME_LABEL,
            COOK_TIME_LABEL,
            SERVINGS_LABEL,
            INGREDIENTS_MARKER,
            STEPS_MARKER,
            GROCERY_LIST_MARKER,
        ];
        let positions: Vec<usize> = labels.iter().map(|l| position(&prompt, l)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);
    }

    #[test]
    fn test_legacy_prompt_has_no_grocery_block() {
        let prompt = PromptBuilder::new(&Preferences::default())
            .with_grocery_list(false)
            .base_prompt();

        assert!(!prompt.contains(GROCERY_LIST_MARKER));
        assert!(!prompt.contains("Meat/Poultry/Seafood:"));
        assert!(prompt.contains("Maximum 6-8 ingredients total"));
    }

    #[test]
    fn test_grocery_block_lists_taxonomy() {
        let prompt = PromptBuilder::new(&Preferences::default()).base_prompt();

        for header in ["Produce:", "Meat/Poultry/Seafood:", "Dairy:", "Pantry:"] {
            assert!(prompt.contains(header), "missing {}", header);
        }
        assert!(prompt.contains("never fractions"));
        assert!(prompt.contains("combine the amounts"));
    }

    #[test]
    fn test_preferences_are_listed() {
        let preferences = Preferences::default()
            .with_cuisines(&["Thai", "Mexican"])
            .with_allergies(&["peanuts"])
            .with_pantry_items(&["Soy Sauce"])
            .with_household_size(HouseholdSize::new(2, 1, 2));
        let prompt = PromptBuilder::new(&preferences).base_prompt();

        assert!(prompt.contains("- Choose from these cuisines: Thai, Mexican"));
        assert!(prompt.contains("- Avoid these ingredients: peanuts"));
        assert!(prompt.contains("- Use these pantry items when possible: Soy Sauce"));
        assert!(prompt.contains("serve 5 people, including 2 adults, 1 teenagers"));
        assert!(prompt.contains("Servings: 5"));
        assert!(!prompt.contains("dietary preferences"));
    }

    #[test]
    fn test_meal_and_retry_context() {
        let builder = PromptBuilder::new(&Preferences::default());

        let context = builder.meal_context(MealType::Dinner, "Korean");
        assert!(context.starts_with("Create a dinner recipe specifically from Korean cuisine."));

        let retry = builder.retry_context(MealType::Dinner, "Korean");
        assert!(retry.starts_with(&context));
        assert!(retry.ends_with(RETRY_INSTRUCTION));

        let full = builder.full_prompt(MealType::Dinner, "Korean", true);
        assert!(full.ends_with(RETRY_INSTRUCTION));
    }
}
