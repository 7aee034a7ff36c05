//! # Grocery Aggregation Tests
//!
//! Merging grocery items across recipes: duplicate collapsing, unit
//! handling, pantry exclusion and category ordering.

use meal_planner::recipe_model::{GroceryCategory, GroceryItem, GroceryList, Ingredient, Recipe};

fn recipe_with_list(name: &str, entries: &[(GroceryCategory, &str, &str, &str)]) -> Recipe {
    let mut list = GroceryList::new();
    for (category, amount, unit, item) in entries {
        list.entry(*category)
            .or_default()
            .push(GroceryItem::new(amount, unit, item));
    }

    Recipe {
        name: name.to_string(),
        prep_time: "10".to_string(),
        cook_time: "20".to_string(),
        servings: 4,
        ingredients: Vec::new(),
        steps: Vec::new(),
        grocery_list: Some(list),
    }
}

fn recipe_with_ingredients(name: &str, ingredients: &[(&str, &str)]) -> Recipe {
    Recipe {
        name: name.to_string(),
        prep_time: "10".to_string(),
        cook_time: "20".to_string(),
        servings: 4,
        ingredients: ingredients
            .iter()
            .map(|(amount, item)| Ingredient::new(amount, item))
            .collect(),
        steps: vec!["Prep".to_string(), "Cook".to_string()],
        grocery_list: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meal_planner::grocery::{aggregate, aggregate_plan};
    use meal_planner::recipe_model::{Day, MealType, WeeklyMealPlan};
    use meal_planner::recipe_parser::RecipeTextParser;
    use std::collections::HashSet;

    /// "1 onion" and "2 onions" from two recipes become one Produce entry
    #[test]
    fn test_onions_from_two_recipes_merge() {
        let parser = RecipeTextParser::lenient();
        let first = parser
            .parse(
                "Name: Onion Soup\nServings: 2\nIngredients:\n- 1 onion\n- 1 cup broth\n- 1 tbsp butter\n\
                 Steps:\n1. Slice\n2. Simmer\nGrocery List:\nProduce:\n- 1 onion",
            )
            .unwrap();
        let second = parser
            .parse(
                "Name: Onion Tart\nServings: 2\nIngredients:\n- 2 onions\n- 1 sheet pastry\n- 1 egg\n\
                 Steps:\n1. Slice\n2. Bake\nGrocery List:\nProduce:\n- 2 onions",
            )
            .unwrap();

        let list = aggregate(&[first, second], &[]);
        let produce = &list[&GroceryCategory::Produce];

        assert_eq!(produce.len(), 1);
        assert_eq!(produce[0].item, "onion");
        assert!(produce[0].amount == "3" || produce[0].amount == "3.00");
    }

    /// A pantry item excludes every item whose name contains it
    #[test]
    fn test_pantry_item_is_excluded() {
        let recipe = recipe_with_ingredients(
            "Garlic Noodles",
            &[("4", "garlic cloves"), ("200 g", "noodles"), ("2 tbsp", "butter")],
        );

        let list = aggregate(&[recipe], &["garlic".to_string()]);
        let names: Vec<&str> = list.values().flatten().map(|i| i.item.as_str()).collect();

        assert!(!names.iter().any(|name| name.contains("garlic")));
        assert!(names.contains(&"noodle"));
        assert!(names.contains(&"butter"));
    }

    /// Case and whitespace variants never produce two entries in one category
    #[test]
    fn test_no_duplicate_names_within_category() {
        let recipes = vec![
            recipe_with_ingredients(
                "One",
                &[("1 cup", "Rice"), ("2", "Eggs"), ("1", "Red Onion (large)")],
            ),
            recipe_with_ingredients(
                "Two",
                &[("2 cups", "  rice "), ("3", "eggs"), ("1", "red   onions")],
            ),
        ];

        let list = aggregate(&recipes, &[]);
        for (category, items) in &list {
            let mut seen = HashSet::new();
            for item in items {
                assert!(seen.insert(item.item.clone()), "{} twice in {}", item.item, category);
            }
        }

        assert_eq!(list[&GroceryCategory::Pantry][0], GroceryItem::new("3", "cups", "rice"));
        assert_eq!(list[&GroceryCategory::Dairy][0], GroceryItem::new("5", "", "egg"));
        assert_eq!(list[&GroceryCategory::Produce][0].item, "red onion");
    }

    /// Only amounts in the most common unit are summed
    #[test]
    fn test_most_frequent_unit_wins() {
        let recipes = vec![
            recipe_with_list("A", &[(GroceryCategory::Pantry, "1.00", "cups", "flour")]),
            recipe_with_list("B", &[(GroceryCategory::Pantry, "200.00", "grams", "flour")]),
            recipe_with_list("C", &[(GroceryCategory::Pantry, "0.50", "cups", "flour")]),
        ];

        let list = aggregate(&recipes, &[]);
        assert_eq!(
            list[&GroceryCategory::Pantry],
            vec![GroceryItem::new("1.5", "cups", "flour")]
        );
    }

    /// Every ingredient of a single recipe survives aggregation
    #[test]
    fn test_single_recipe_keeps_every_ingredient() {
        let recipe = recipe_with_ingredients(
            "Stir Fry",
            &[
                ("1 cup", "jasmine rice"),
                ("300 g", "chicken breast"),
                ("1", "bell pepper"),
                ("2 tbsp", "soy sauce"),
                ("1/2 cup", "plain yogurt"),
            ],
        );

        let list = aggregate(std::slice::from_ref(&recipe), &[]);
        let total: usize = list.values().map(Vec::len).sum();
        assert_eq!(total, recipe.ingredients.len());

        assert_eq!(
            list[&GroceryCategory::MeatPoultrySeafood],
            vec![GroceryItem::new("300", "grams", "chicken breast")]
        );
        assert_eq!(list[&GroceryCategory::Dairy][0].amount, "0.5");
    }

    /// A grocery section with unknown headers falls back to the ingredients
    #[test]
    fn test_unusable_grocery_section_keeps_ingredients() {
        let recipe = RecipeTextParser::lenient()
            .parse(
                "Name: Onion Broth\nServings: 2\nIngredients:\n- 2 onions\n- 1 cup broth\n- 1 tbsp butter\n\
                 Steps:\n1. Slice\n2. Simmer\nGrocery List:\nVegetables:\n- 2 onion\nOther:\n- 1 cups broth",
            )
            .unwrap();

        let list = aggregate(std::slice::from_ref(&recipe), &[]);
        let total: usize = list.values().map(Vec::len).sum();
        assert_eq!(total, 3);
        assert_eq!(list[&GroceryCategory::Produce], vec![GroceryItem::new("2", "", "onion")]);
    }

    /// An attached but empty grocery list counts as missing
    #[test]
    fn test_empty_grocery_list_falls_back_to_ingredients() {
        let mut recipe = recipe_with_ingredients(
            "Omelette",
            &[("3", "eggs"), ("1", "tomato"), ("50 g", "cheddar")],
        );
        let mut empty = GroceryList::new();
        empty.insert(GroceryCategory::Produce, Vec::new());
        recipe.grocery_list = Some(empty);

        let list = aggregate(&[recipe], &[]);
        let total: usize = list.values().map(Vec::len).sum();
        assert_eq!(total, 3);
    }

    /// Categories with nothing left after exclusion are omitted
    #[test]
    fn test_empty_categories_are_omitted() {
        let recipe = recipe_with_list(
            "Salad",
            &[
                (GroceryCategory::Produce, "1.00", "", "lettuce"),
                (GroceryCategory::Pantry, "2.00", "tablespoons", "olive oil"),
            ],
        );

        let list = aggregate(&[recipe], &["Olive Oil".to_string()]);
        assert_eq!(list.keys().copied().collect::<Vec<_>>(), vec![GroceryCategory::Produce]);
    }

    /// Plan aggregation covers every filled slot
    #[test]
    fn test_aggregate_plan() {
        let mut plan = WeeklyMealPlan::new();
        plan.insert(
            Day::Monday,
            MealType::Dinner,
            recipe_with_list("A", &[(GroceryCategory::Produce, "1.00", "", "lemon")]),
        );
        plan.insert(
            Day::Friday,
            MealType::Lunch,
            recipe_with_list("B", &[(GroceryCategory::Produce, "2.00", "", "lemon")]),
        );

        let list = aggregate_plan(&plan, &[]);
        assert_eq!(
            list[&GroceryCategory::Produce],
            vec![GroceryItem::new("3", "", "lemon")]
        );
    }
}
