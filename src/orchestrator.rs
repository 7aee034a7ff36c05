//! # Meal Plan Orchestrator Module
//!
//! Walks the day × meal grid in canonical order and fills every selected
//! slot with a recipe:
//!
//! 1. pick the target cuisine (least used so far)
//! 2. request a recipe for base prompt + meal addendum
//! 3. parse it; on a repeated name retry exactly once with another cuisine
//! 4. validate; on failure substitute a fallback (lenient) or abort (strict)
//! 5. record the cuisine and name, report progress
//!
//! Slots run strictly one after another: duplicate detection needs every
//! earlier recipe, and a courtesy delay follows every network round-trip.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::circuit_breaker::CircuitBreaker;
use crate::config::PlannerConfig;
pub use crate::config::OrchestrationStrategy;
use crate::cuisine::{pick_alternate_cuisine, pick_cuisine, CuisineUsage};
use crate::errors::PlannerError;
use crate::fallback::fallback_recipe;
use crate::generation_client::{GenerationRequest, TextGenerator};
use crate::prompt::PromptBuilder;
use crate::recipe_model::{Day, MealType, Preferences, Recipe, WeeklyMealPlan};
use crate::recipe_parser::{validation_problem, RecipeTextParser};

/// Reported after each finished slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotProgress {
    pub day: Day,
    pub meal: MealType,
    /// Slots finished so far, including this one
    pub completed: usize,
    /// Selected slots in the whole run
    pub total: usize,
}

/// State owned by one generation run
#[derive(Debug, Clone, Default)]
pub struct RunState {
    generated_names: HashSet<String>,
    cuisine_usage: CuisineUsage,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a recipe with this name (case-insensitive) was already produced
    pub fn is_duplicate(&self, recipe: &Recipe) -> bool {
        self.generated_names.contains(&recipe.name_key())
    }

    pub fn record(&mut self, recipe: &Recipe, cuisine: &str) {
        self.generated_names.insert(recipe.name_key());
        self.cuisine_usage.record(cuisine);
    }

    pub fn cuisine_usage(&self) -> &CuisineUsage {
        &self.cuisine_usage
    }
}

/// Per-run inputs shared by every slot
struct RunContext<'a> {
    preferences: &'a Preferences,
    prompts: PromptBuilder,
    base_prompt: String,
    parser: RecipeTextParser,
    cancel: &'a CancellationToken,
}

pub struct MealPlanOrchestrator {
    generator: Arc<dyn TextGenerator>,
    config: PlannerConfig,
}

impl MealPlanOrchestrator {
    pub fn new(generator: Arc<dyn TextGenerator>, config: PlannerConfig) -> Self {
        Self { generator, config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Generate a plan without cancellation or progress reporting
    pub async fn generate(&self, preferences: &Preferences) -> Result<WeeklyMealPlan, PlannerError> {
        self.generate_with(preferences, &CancellationToken::new(), |_| {})
            .await
    }

    /// Generate a plan, reporting each finished slot to `on_progress`
    ///
    /// Cancelling `cancel` stops the run before the next slot, or aborts the
    /// in-flight request or delay, and returns [`PlannerError::Cancelled`].
    pub async fn generate_with<F>(
        &self,
        preferences: &Preferences,
        cancel: &CancellationToken,
        mut on_progress: F,
    ) -> Result<WeeklyMealPlan, PlannerError>
    where
        F: FnMut(SlotProgress) + Send,
    {
        preferences.validate()?;

        let prompts = PromptBuilder::new(preferences)
            .with_grocery_list(self.config.include_grocery_list);
        let context = RunContext {
            preferences,
            base_prompt: prompts.base_prompt(),
            prompts,
            parser: match self.config.strategy {
                OrchestrationStrategy::Lenient => RecipeTextParser::lenient(),
                OrchestrationStrategy::Strict => RecipeTextParser::strict(),
            },
            cancel,
        };

        let slots = preferences.meal_selection.selected_slots();
        let total = slots.len();
        let mut state = RunState::new();
        let mut breaker = CircuitBreaker::new(self.config.network_failure_threshold);
        let mut plan = WeeklyMealPlan::new();

        info!(
            slots = total,
            strategy = ?self.config.strategy,
            cuisines = ?preferences.cuisines,
            "Starting meal plan generation"
        );

        for (index, (day, meal)) in slots.into_iter().enumerate() {
            if cancel.is_cancelled() {
                info!(completed = index, total, "Meal plan generation cancelled");
                return Err(PlannerError::Cancelled);
            }

            let cuisine = pick_cuisine(&preferences.cuisines, state.cuisine_usage());
            info!(day = %day, meal = %meal, cuisine = %cuisine, "Generating slot");

            let (recipe, used_cuisine) = match self
                .generate_slot(&context, meal, cuisine.clone(), &state, &mut breaker)
                .await
            {
                Ok(generated) => generated,
                Err(PlannerError::Cancelled) => return Err(PlannerError::Cancelled),
                Err(err) => match self.config.strategy {
                    OrchestrationStrategy::Strict => {
                        warn!(day = %day, meal = %meal, error = %err, "Slot failed, abandoning plan");
                        return Err(PlannerError::SlotFailed {
                            day,
                            meal,
                            reason: err.to_string(),
                        });
                    }
                    OrchestrationStrategy::Lenient => {
                        if breaker.is_open() {
                            warn!(
                                failures = breaker.consecutive_failures(),
                                "Generation service unreachable, abandoning plan"
                            );
                            return Err(breaker.last_failure().cloned().unwrap_or(err));
                        }
                        warn!(day = %day, meal = %meal, error = %err, "Using fallback recipe");
                        (fallback_recipe(meal, &cuisine), cuisine)
                    }
                },
            };

            info!(day = %day, meal = %meal, recipe = %recipe.name, "Slot complete");
            state.record(&recipe, &used_cuisine);
            plan.insert(day, meal, recipe);

            on_progress(SlotProgress {
                day,
                meal,
                completed: index + 1,
                total,
            });
        }

        info!(recipes = plan.recipe_count(), "Meal plan generation finished");
        Ok(plan)
    }

    /// One slot: first attempt, at most one duplicate retry, validation
    async fn generate_slot(
        &self,
        context: &RunContext<'_>,
        meal: MealType,
        cuisine: String,
        state: &RunState,
        breaker: &mut CircuitBreaker,
    ) -> Result<(Recipe, String), PlannerError> {
        let prompt = format!(
            "{}\n\n{}",
            context.base_prompt,
            context.prompts.meal_context(meal, &cuisine)
        );
        let text = self
            .request(prompt, self.config.generation.temperature, breaker, context.cancel)
            .await?;
        let mut recipe = context.parser.parse(&text)?;
        let mut used_cuisine = cuisine;

        if state.is_duplicate(&recipe) {
            let alternate = pick_alternate_cuisine(
                &context.preferences.cuisines,
                &used_cuisine,
                &mut rand::thread_rng(),
            );
            info!(
                recipe = %recipe.name,
                cuisine = %alternate,
                "Duplicate recipe name, retrying once"
            );

            let prompt = format!(
                "{}\n\n{}",
                context.base_prompt,
                context.prompts.retry_context(meal, &alternate)
            );
            let retried = self
                .request(prompt, self.config.generation.retry_temperature, breaker, context.cancel)
                .await
                .and_then(|text| context.parser.parse(&text).map_err(PlannerError::from));

            match retried {
                Ok(retry) if !state.is_duplicate(&retry) => {
                    recipe = retry;
                    used_cuisine = alternate;
                }
                Ok(retry) => {
                    debug!(recipe = %retry.name, "Retry repeated a name too, keeping first attempt");
                }
                Err(PlannerError::Cancelled) => return Err(PlannerError::Cancelled),
                Err(err) => {
                    warn!(error = %err, "Duplicate retry failed, keeping first attempt");
                }
            }
        }

        if let Some(problem) = validation_problem(&recipe) {
            return Err(PlannerError::Validation(problem));
        }
        Ok((recipe, used_cuisine))
    }

    /// One network round-trip followed by the courtesy delay
    async fn request(
        &self,
        prompt: String,
        temperature: f32,
        breaker: &mut CircuitBreaker,
        cancel: &CancellationToken,
    ) -> Result<String, PlannerError> {
        let request =
            GenerationRequest::new(prompt, temperature, self.config.generation.max_output_tokens);

        let outcome = tokio::select! {
            _ = cancel.cancelled() => return Err(PlannerError::Cancelled),
            outcome = self.generator.generate(request) => outcome,
        };
        breaker.record(&outcome);

        if self.config.request_delay_ms > 0 {
            tokio::select! {
                _ = cancel.cancelled() => return Err(PlannerError::Cancelled),
                _ = tokio::time::sleep(Duration::from_millis(self.config.request_delay_ms)) => {}
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback_recipe;

    fn recipe(name: &str) -> Recipe {
        let mut recipe = fallback_recipe(MealType::Dinner, "Thai");
        recipe.name = name.to_string();
        recipe
    }

    #[test]
    fn test_run_state_duplicates_ignore_case() {
        let mut state = RunState::new();
        state.record(&recipe("Pad Thai"), "Thai");

        assert!(state.is_duplicate(&recipe("pad thai ")));
        assert!(!state.is_duplicate(&recipe("Green Curry")));
        assert_eq!(state.cuisine_usage().count("Thai"), 1);
    }
}
