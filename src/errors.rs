//! # Error Types Module
//!
//! Error types for recipe parsing and plan generation. Parse errors are
//! recovered per slot by the orchestrator; planner errors reach the caller.

use crate::recipe_model::{Day, MealType};

/// A required part of a recipe response is missing
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A section marker such as "Ingredients:" never appears
    MissingSection(&'static str),
    /// Strict parsing found no "Servings:" line
    MissingServings,
    /// "Servings:" is present but not a positive number
    InvalidServings(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingSection(section) => {
                write!(f, "Recipe is missing the '{section}' section")
            }
            ParseError::MissingServings => {
                write!(f, "Recipe is missing serving size information")
            }
            ParseError::InvalidServings(value) => write!(f, "Invalid serving size: {value}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors surfaced by plan generation
#[derive(Debug, Clone)]
pub enum PlannerError {
    /// No API key configured for the generation service
    MissingApiKey(String),
    /// Transport-level failure talking to the generation service
    Network(String),
    /// Non-success HTTP status from the generation service
    Api { status: u16, body: String },
    /// The response had no candidate text
    EmptyResponse(String),
    /// The candidate text could not be parsed into a recipe
    Parse(ParseError),
    /// A parsed recipe failed validation
    Validation(String),
    /// Strict mode: one slot failed and the whole plan was abandoned
    SlotFailed {
        day: Day,
        meal: MealType,
        reason: String,
    },
    /// The caller cancelled the run
    Cancelled,
    /// Preferences outside the bounds the form allows
    InvalidPreferences(String),
}

impl PlannerError {
    /// Whether the failure happened at the network layer
    pub fn is_network(&self) -> bool {
        matches!(self, PlannerError::Network(_) | PlannerError::Api { .. })
    }
}

impl std::fmt::Display for PlannerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlannerError::MissingApiKey(var) => {
                write!(f, "API key not found in environment: {var}")
            }
            PlannerError::Network(msg) => write!(f, "Network error: {msg}"),
            PlannerError::Api { status, body } => write!(f, "API error {status}: {body}"),
            PlannerError::EmptyResponse(msg) => write!(f, "Invalid API response format: {msg}"),
            PlannerError::Parse(err) => write!(f, "Parse error: {err}"),
            PlannerError::Validation(msg) => write!(f, "Invalid recipe format: {msg}"),
            PlannerError::SlotFailed { day, meal, reason } => write!(
                f,
                "Failed to generate {} for {}: {reason}",
                meal.as_str(),
                day.display_name()
            ),
            PlannerError::Cancelled => write!(f, "Meal plan generation was cancelled"),
            PlannerError::InvalidPreferences(msg) => write!(f, "Invalid preferences: {msg}"),
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlannerError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for PlannerError {
    fn from(err: ParseError) -> Self {
        PlannerError::Parse(err)
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs may carry credentials
        let err = err.without_url();
        match err.status() {
            Some(status) => PlannerError::Api {
                status: status.as_u16(),
                body: err.to_string(),
            },
            None => PlannerError::Network(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_failure_names_day_and_meal() {
        let err = PlannerError::SlotFailed {
            day: Day::Wednesday,
            meal: MealType::Lunch,
            reason: ParseError::MissingServings.to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Failed to generate lunch for Wednesday: Recipe is missing serving size information"
        );
    }

    #[test]
    fn test_network_classification() {
        assert!(PlannerError::Network("timeout".into()).is_network());
        assert!(PlannerError::Api {
            status: 503,
            body: String::new()
        }
        .is_network());
        assert!(!PlannerError::EmptyResponse("no candidates".into()).is_network());
        assert!(!PlannerError::Parse(ParseError::MissingSection("Steps:")).is_network());
    }
}
