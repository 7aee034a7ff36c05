//! # Export Module
//!
//! Plain-text and HTML renderings of a meal plan and of a grocery list, for
//! copy, share and e-mail actions. Output depends only on the input, so the
//! same plan always renders the same way.

use chrono::NaiveDate;

use crate::recipe_model::{GroceryCategory, GroceryItem, GroceryList, WeeklyMealPlan};

fn plan_title(week_of: Option<NaiveDate>) -> String {
    match week_of {
        Some(date) => format!("Weekly Meal Plan (week of {})", date.format("%B %-d, %Y")),
        None => "Weekly Meal Plan".to_string(),
    }
}

/// Days with at least one recipe, each meal as a one-line summary
///
/// ```text
/// Weekly Meal Plan
///
/// Monday
///   Breakfast: Thai Breakfast Bowl (prep 10 min, cook 15 min, serves 2)
/// ```
pub fn render_plan_text(plan: &WeeklyMealPlan, week_of: Option<NaiveDate>) -> String {
    let mut out = plan_title(week_of);
    out.push('\n');

    for (day, meals) in plan.days().filter(|(_, meals)| !meals.is_empty()) {
        out.push('\n');
        out.push_str(day.display_name());
        out.push('\n');
        for (meal, recipe) in meals.meals() {
            out.push_str(&format!("  {}: {}\n", meal.display_name(), recipe));
        }
    }
    out
}

pub fn render_plan_html(plan: &WeeklyMealPlan, week_of: Option<NaiveDate>) -> String {
    let mut out = format!("<h1>{}</h1>", escape_html(&plan_title(week_of)));

    for (day, meals) in plan.days().filter(|(_, meals)| !meals.is_empty()) {
        out.push_str(&format!("<h2>{}</h2><ul>", day.display_name()));
        for (meal, recipe) in meals.meals() {
            out.push_str(&format!(
                "<li><strong>{}:</strong> {}</li>",
                meal.display_name(),
                escape_html(&recipe.to_string())
            ));
        }
        out.push_str("</ul>");
    }
    out
}

/// Categories in display order, items in list order
fn ordered_categories(
    list: &GroceryList,
) -> impl Iterator<Item = (GroceryCategory, &[GroceryItem])> + '_ {
    GroceryCategory::ALL.into_iter().filter_map(move |category| {
        list.get(&category)
            .filter(|items| !items.is_empty())
            .map(|items| (category, items.as_slice()))
    })
}

/// "Grocery List:" followed by one block per non-empty category
pub fn render_grocery_text(list: &GroceryList) -> String {
    let mut out = String::from("Grocery List:\n");
    for (category, items) in ordered_categories(list) {
        out.push_str(&format!("\n{}:\n", category));
        for item in items {
            out.push_str(&format!("- {}\n", item));
        }
    }
    out
}

pub fn render_grocery_html(list: &GroceryList) -> String {
    let mut out = String::from("<h2>Grocery List</h2>");
    for (category, items) in ordered_categories(list) {
        out.push_str(&format!("<h3>{}</h3><ul>", escape_html(category.as_str())));
        for item in items {
            out.push_str(&format!("<li>{}</li>", escape_html(&item.to_string())));
        }
        out.push_str("</ul>");
    }
    out
}

fn escape_html(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}
