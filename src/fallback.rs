//! # Fallback Recipe Module
//!
//! Built-in recipes substituted by a lenient plan run when a slot cannot be
//! generated. Every recipe here passes [`crate::recipe_parser::is_valid_recipe`].

use crate::recipe_model::{Ingredient, MealType, Recipe};

/// Cuisine named in the fallback title when none is known
pub const DEFAULT_CUISINE: &str = "International";

fn ingredients(lines: &[(&str, &str)]) -> Vec<Ingredient> {
    lines
        .iter()
        .map(|(amount, item)| Ingredient::new(amount, item))
        .collect()
}

fn steps(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|step| step.to_string()).collect()
}

/// Hardcoded recipe for a meal type, titled after the cuisine
///
/// # Examples
///
/// ```rust
/// use meal_planner::fallback::fallback_recipe;
/// use meal_planner::recipe_model::MealType;
/// use meal_planner::recipe_parser::is_valid_recipe;
///
/// let recipe = fallback_recipe(MealType::Lunch, "Greek");
/// assert_eq!(recipe.name, "Greek Garden Bowl");
/// assert!(is_valid_recipe(&recipe));
/// ```
pub fn fallback_recipe(meal: MealType, cuisine: &str) -> Recipe {
    let cuisine = match cuisine.trim() {
        "" => DEFAULT_CUISINE,
        named => named,
    };

    match meal {
        MealType::Breakfast => Recipe {
            name: format!("{cuisine} Breakfast Bowl"),
            prep_time: "10".to_string(),
            cook_time: "15".to_string(),
            servings: 2,
            ingredients: ingredients(&[
                ("1 cup", "rolled oats"),
                ("1 medium", "banana"),
                ("1 tbsp", "honey"),
                ("1/4 cup", "mixed nuts"),
                ("1 cup", "milk of choice"),
                ("1/2 tsp", "cinnamon"),
                ("1 pinch", "salt"),
            ]),
            steps: steps(&[
                "Combine oats and milk in a microwave-safe bowl",
                "Microwave for 2 minutes, stirring halfway through",
                "Slice banana and add on top",
                "Add cinnamon and a pinch of salt",
                "Drizzle with honey and sprinkle with nuts",
            ]),
            grocery_list: None,
        },
        MealType::Lunch => Recipe {
            name: format!("{cuisine} Garden Bowl"),
            prep_time: "15".to_string(),
            cook_time: "0".to_string(),
            servings: 2,
            ingredients: ingredients(&[
                ("3 cups", "mixed greens"),
                ("1 medium", "tomato"),
                ("1", "cucumber"),
                ("1/4 cup", "olive oil"),
                ("2 tbsp", "lemon juice"),
                ("1/2 cup", "quinoa, cooked"),
                ("1/4 cup", "mixed seeds"),
            ]),
            steps: steps(&[
                "Wash and chop all vegetables",
                "Cook quinoa according to package instructions",
                "Combine greens, tomato, and cucumber in a bowl",
                "Whisk together olive oil and lemon juice",
                "Top with quinoa and seeds, then drizzle with dressing",
            ]),
            grocery_list: None,
        },
        MealType::Dinner => Recipe {
            name: format!("{cuisine} Rice Bowl"),
            prep_time: "15".to_string(),
            cook_time: "25".to_string(),
            servings: 2,
            ingredients: ingredients(&[
                ("1 cup", "jasmine rice"),
                ("2 cups", "vegetable broth"),
                ("2 tbsp", "olive oil"),
                ("2 cloves", "garlic"),
                ("1 cup", "mixed vegetables"),
                ("1 tbsp", "soy sauce"),
                ("2", "eggs"),
            ]),
            steps: steps(&[
                "Cook rice in vegetable broth according to package instructions",
                "Mince garlic and sauté in olive oil until fragrant",
                "Add mixed vegetables and stir-fry until tender",
                "Fry eggs to desired doneness",
                "Combine rice and vegetables, top with fried egg and soy sauce",
            ]),
            grocery_list: None,
        },
    }
}
