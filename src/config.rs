//! # Planner Configuration Module
//!
//! Configuration structures for plan generation: the generation-service
//! request parameters, the pacing between requests and the failure policy.

use anyhow::{Context, Result};
use log::{info, warn};
use std::env;
use std::fs;
use std::path::Path;

use crate::recipe_model::Preferences;

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_RETRY_TEMPERATURE: f32 = 0.95;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;
pub const DEFAULT_NETWORK_FAILURE_THRESHOLD: u32 = 3;

/// Environment variable holding the generation-service key
pub const API_KEY_ENV_VAR: &str = "GOOGLE_API_KEY";

/// What happens when a slot cannot produce a valid recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrchestrationStrategy {
    /// Substitute a built-in recipe and keep going
    #[default]
    Lenient,
    /// Abandon the whole plan, naming the failed slot
    Strict,
}

impl OrchestrationStrategy {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "lenient" => Some(Self::Lenient),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

/// Parameters sent with every generation request
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Base URL of the models endpoint
    pub api_url: String,
    /// Model name appended to the base URL
    pub model: String,
    /// Sampling temperature for first attempts (high for variety)
    pub temperature: f32,
    /// Sampling temperature for the duplicate-name retry
    pub retry_temperature: f32,
    /// Upper bound on generated tokens
    pub max_output_tokens: u32,
    /// HTTP timeout per request in seconds
    pub request_timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            retry_temperature: DEFAULT_RETRY_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Configuration for one plan generation run
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Failure policy per slot
    pub strategy: OrchestrationStrategy,
    /// Courtesy delay after every network round-trip, in milliseconds
    pub request_delay_ms: u64,
    /// Ask the generator for a categorized grocery list with each recipe
    pub include_grocery_list: bool,
    /// Consecutive network failures after which a lenient run gives up
    pub network_failure_threshold: u32,
    /// Generation request parameters
    pub generation: GenerationConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            strategy: OrchestrationStrategy::default(),
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            include_grocery_list: true,
            network_failure_threshold: DEFAULT_NETWORK_FAILURE_THRESHOLD,
            generation: GenerationConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Defaults overridden by `.env` and `MEAL_PLANNER_*` environment variables
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let mut config = Self::default();

        if let Some(value) = read_var("MEAL_PLANNER_STRATEGY") {
            match OrchestrationStrategy::from_name(&value) {
                Some(strategy) => config.strategy = strategy,
                None => warn!("Ignoring unknown MEAL_PLANNER_STRATEGY '{}'", value),
            }
        }
        if let Some(value) = read_var("MEAL_PLANNER_REQUEST_DELAY_MS") {
            match value.parse() {
                Ok(delay) => config.request_delay_ms = delay,
                Err(_) => warn!("Ignoring invalid MEAL_PLANNER_REQUEST_DELAY_MS '{}'", value),
            }
        }
        if let Some(value) = read_var("MEAL_PLANNER_GROCERY_LIST") {
            match value.parse() {
                Ok(enabled) => config.include_grocery_list = enabled,
                Err(_) => warn!("Ignoring invalid MEAL_PLANNER_GROCERY_LIST '{}'", value),
            }
        }
        if let Some(value) = read_var("MEAL_PLANNER_MODEL") {
            config.generation.model = value;
        }
        if let Some(value) = read_var("MEAL_PLANNER_API_URL") {
            config.generation.api_url = value.trim_end_matches('/').to_string();
        }

        config
    }
}

/// Read and validate a preferences JSON file (camelCase field names)
pub fn load_preferences(path: &Path) -> Result<Preferences> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read preferences file {}", path.display()))?;
    let preferences: Preferences = serde_json::from_str(&content)
        .with_context(|| format!("Invalid preferences JSON in {}", path.display()))?;
    preferences.validate()?;

    info!(
        "Loaded preferences from {}: {} slots selected",
        path.display(),
        preferences.selected_slot_count()
    );
    Ok(preferences)
}

fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
