//! # Recipe Parser Tests
//!
//! Parsing of complete generation responses into recipes, including the
//! categorized grocery-list section and recipe validation.

#[cfg(test)]
mod tests {
    use meal_planner::errors::ParseError;
    use meal_planner::recipe_model::{GroceryCategory, GroceryItem, Ingredient};
    use meal_planner::recipe_parser::{
        is_valid_recipe, parse_grocery_section, RecipeTextParser, PLACEHOLDER_NAME,
    };

    const TOMATO_PASTA: &str = "Name: Simple Tomato Pasta
Prep Time: 10
Cook Time: 20
Servings: 4
Ingredients:
- 2 cups pasta
- 1 can tomatoes
- 2 cloves garlic
Steps:
1. Boil pasta
2. Sauté garlic
3. Add tomatoes and combine
Grocery List:
Produce:
- 2 cloves garlic
Pantry:
- 2 cups pasta
- 1 can tomatoes";

    /// Labeled response with a grocery list parses into every field
    #[test]
    fn test_simple_tomato_pasta() {
        let recipe = RecipeTextParser::lenient().parse(TOMATO_PASTA).unwrap();

        assert_eq!(recipe.name, "Simple Tomato Pasta");
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.steps, vec!["Boil pasta", "Sauté garlic", "Add tomatoes and combine"]);
        assert!(is_valid_recipe(&recipe));

        let grocery = recipe.grocery_list.expect("grocery list should be parsed");
        assert_eq!(
            grocery[&GroceryCategory::Produce],
            vec![GroceryItem::new("2.00", "", "garlic")]
        );

        let pantry = &grocery[&GroceryCategory::Pantry];
        assert_eq!(pantry.len(), 2);
        assert_eq!(pantry[0].item, "pasta");
        assert_eq!(pantry[0].amount, "2.00");
        assert_eq!(pantry[0].unit, "cups");
        assert!(pantry[1].item.starts_with("tomato"));
        assert_eq!(pantry[1].amount, "1.00");
        assert_eq!(grocery.len(), 2);
    }

    /// Ingredient lines keep the amount phrase and item separately
    #[test]
    fn test_ingredient_split() {
        let recipe = RecipeTextParser::lenient().parse(TOMATO_PASTA).unwrap();

        assert_eq!(
            recipe.ingredients,
            vec![
                Ingredient::new("2 cups", "pasta"),
                Ingredient::new("1 can", "tomatoes"),
                Ingredient::new("2 cloves", "garlic"),
            ]
        );
    }

    /// Code fences, CRLF line endings and lower-case labels are tolerated
    #[test]
    fn test_fenced_crlf_response() {
        let raw = format!("```\r\n{}\r\n```", TOMATO_PASTA.replace('\n', "\r\n"))
            .replace("Ingredients:", "ingredients:")
            .replace("Steps:", "STEPS:");

        let recipe = RecipeTextParser::strict().parse(&raw).unwrap();
        assert_eq!(recipe.name, "Simple Tomato Pasta");
        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.steps.len(), 3);
    }

    /// Without a grocery section the recipe still parses, with no list attached
    #[test]
    fn test_legacy_response_without_grocery_list() {
        let text = TOMATO_PASTA
            .split("Grocery List:")
            .next()
            .unwrap_or_default();

        let recipe = RecipeTextParser::lenient().parse(text).unwrap();
        assert!(recipe.grocery_list.is_none());
        assert_eq!(recipe.steps.len(), 3);
    }

    /// A grocery section with only unknown categories is treated as absent
    #[test]
    fn test_grocery_list_with_unknown_headers_is_dropped() {
        let text = TOMATO_PASTA
            .replace("Produce:", "Vegetables:")
            .replace("Pantry:\n", "Other:\n");

        let recipe = RecipeTextParser::lenient().parse(&text).unwrap();
        assert!(recipe.grocery_list.is_none());
        assert_eq!(recipe.ingredients.len(), 3);
    }

    /// Missing sections fail; missing servings only fail the strict parser
    #[test]
    fn test_missing_sections() {
        let no_steps = "Name: Toast\nServings: 1\nIngredients:\n- 1 slice bread";
        assert_eq!(
            RecipeTextParser::lenient().parse(no_steps),
            Err(ParseError::MissingSection("Steps:"))
        );

        let no_ingredients = "Name: Toast\nServings: 1\nSteps:\n1. Toast bread";
        assert_eq!(
            RecipeTextParser::lenient().parse(no_ingredients),
            Err(ParseError::MissingSection("Ingredients:"))
        );

        let no_servings = TOMATO_PASTA.replace("Servings: 4\n", "");
        assert_eq!(
            RecipeTextParser::strict().parse(&no_servings),
            Err(ParseError::MissingServings)
        );
        assert_eq!(
            RecipeTextParser::strict()
                .parse(&no_servings)
                .unwrap_err()
                .to_string(),
            "Recipe is missing serving size information"
        );

        let lenient = RecipeTextParser::lenient().parse(&no_servings).unwrap();
        assert_eq!(lenient.servings, 4);
    }

    /// A servings line without a number is an error only for the strict parser
    #[test]
    fn test_unreadable_servings() {
        let text = TOMATO_PASTA.replace("Servings: 4", "Servings: a few");

        assert_eq!(
            RecipeTextParser::strict().parse(&text),
            Err(ParseError::InvalidServings("a few".to_string()))
        );
        assert_eq!(RecipeTextParser::lenient().parse(&text).unwrap().servings, 4);
    }

    /// Placeholder names and bracket artifacts are rejected
    #[test]
    fn test_validation_rejects_placeholders() {
        let parser = RecipeTextParser::lenient();

        let unnamed = parser.parse(&TOMATO_PASTA.replace("Name: Simple Tomato Pasta\n", "")).unwrap();
        assert_eq!(unnamed.name, PLACEHOLDER_NAME);
        assert!(!is_valid_recipe(&unnamed));

        let bracketed = parser
            .parse(&TOMATO_PASTA.replace("Simple Tomato Pasta", "[Recipe Name]"))
            .unwrap();
        assert!(!is_valid_recipe(&bracketed));

        let bracket_item = parser
            .parse(&TOMATO_PASTA.replace("- 2 cups pasta\n- 1 can", "- 2 cups [pasta type]\n- 1 can"))
            .unwrap();
        assert!(!is_valid_recipe(&bracket_item));
    }

    /// Too few ingredients or steps fail validation
    #[test]
    fn test_validation_rejects_thin_recipes() {
        let parser = RecipeTextParser::lenient();

        let two_ingredients = parser
            .parse(&TOMATO_PASTA.replace("- 2 cloves garlic\nSteps:", "Steps:"))
            .unwrap();
        assert_eq!(two_ingredients.ingredients.len(), 2);
        assert!(!is_valid_recipe(&two_ingredients));

        let one_step = parser
            .parse(&TOMATO_PASTA.replace("2. Sauté garlic\n3. Add tomatoes and combine\n", ""))
            .unwrap();
        assert_eq!(one_step.steps.len(), 1);
        assert!(!is_valid_recipe(&one_step));
    }

    /// Unknown categories are dropped and duplicates within a category merge
    #[test]
    fn test_grocery_section_merges_and_drops() {
        let section = "
Produce:
- 1 onion
- 2 onions, diced
- 0 limes
Spices:
- 1 tsp cumin
**Dairy:**
- 1 cup milk
- 0.5 cups milk
Pantry:
";
        let list = parse_grocery_section(section);

        assert_eq!(list.len(), 2);
        assert_eq!(
            list[&GroceryCategory::Produce],
            vec![GroceryItem::new("3.00", "", "onion")]
        );
        assert_eq!(
            list[&GroceryCategory::Dairy],
            vec![GroceryItem::new("1.50", "cups", "milk")]
        );
        assert!(list.values().flatten().all(|item| item.item != "cumin"));
    }

    /// The same name in two categories stays as two entries
    #[test]
    fn test_grocery_merge_is_per_category() {
        let section = "Produce:\n- 1 cups coconut\nPantry:\n- 2 cups coconut";
        let list = parse_grocery_section(section);

        assert_eq!(list[&GroceryCategory::Produce][0].amount, "1.00");
        assert_eq!(list[&GroceryCategory::Pantry][0].amount, "2.00");
    }
}
