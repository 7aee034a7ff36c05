use anyhow::{Context, Result};
use chrono::Local;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use meal_planner::catalog::{cuisine_description, item_by_name};
use meal_planner::config::{load_preferences, PlannerConfig};
use meal_planner::export::{render_grocery_html, render_grocery_text, render_plan_html, render_plan_text};
use meal_planner::generation_client::GeminiClient;
use meal_planner::grocery::aggregate_plan;
use meal_planner::localization::user_error_message;
use meal_planner::orchestrator::MealPlanOrchestrator;

const USAGE: &str = "usage: meal-planner <preferences.json> [--html]";

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting meal planner");

    let mut args = env::args().skip(1);
    let preferences_path = PathBuf::from(args.next().context(USAGE)?);
    let html = args.any(|arg| arg == "--html");

    let preferences = load_preferences(&preferences_path)?;
    for cuisine in &preferences.cuisines {
        match cuisine_description(cuisine) {
            Some(description) => debug!(cuisine = %cuisine, description, "Selected cuisine"),
            None => warn!(cuisine = %cuisine, "Cuisine is not in the catalog, using it as written"),
        }
    }
    let custom_pantry = preferences
        .pantry_items
        .iter()
        .filter(|item| item_by_name(item).is_none())
        .count();
    info!(
        pantry_items = preferences.pantry_items.len(),
        custom = custom_pantry,
        "Pantry loaded"
    );

    let config = PlannerConfig::from_env();

    let client = match GeminiClient::from_env(config.generation.clone()) {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "Could not create generation client");
            eprintln!("{}", user_error_message(&err));
            std::process::exit(1);
        }
    };
    let orchestrator = MealPlanOrchestrator::new(Arc::new(client), config);

    // Ctrl-C abandons the run
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let result = orchestrator
        .generate_with(&preferences, &cancel, |progress| {
            eprintln!(
                "[{}/{}] {} {} ready",
                progress.completed,
                progress.total,
                progress.day.display_name(),
                progress.meal.as_str()
            );
        })
        .await;

    let plan = match result {
        Ok(plan) => plan,
        Err(err) => {
            error!(error = %err, "Meal plan generation failed");
            eprintln!("{}", user_error_message(&err));
            std::process::exit(1);
        }
    };

    let groceries = aggregate_plan(&plan, &preferences.pantry_items);
    let week_of = Some(Local::now().date_naive());

    if html {
        println!("{}", render_plan_html(&plan, week_of));
        println!("{}", render_grocery_html(&groceries));
    } else {
        println!("{}", render_plan_text(&plan, week_of));
        println!("{}", render_grocery_text(&groceries));
    }

    info!(recipes = plan.recipe_count(), "Meal plan complete");
    Ok(())
}
