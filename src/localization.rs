//! # Localization Module
//!
//! Fluent messages shown to people when plan generation fails. Raw error
//! text stays in the logs; users get a short explanation and a few things
//! to try.

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use std::collections::HashMap;
use std::sync::OnceLock;
use unic_langid::LanguageIdentifier;

use crate::errors::PlannerError;

const EN_MESSAGES: &str = include_str!("../locales/en/main.ftl");

/// Remediation hints, in display order
const HINT_KEYS: [&str; 4] = [
    "error-hint-fewer-meals",
    "error-hint-pantry",
    "error-hint-dietary",
    "error-hint-retry",
];

/// Localization manager for the meal planner
pub struct LocalizationManager {
    bundle: FluentBundle<FluentResource>,
}

impl LocalizationManager {
    /// Manager over the embedded English messages
    pub fn new() -> Self {
        let locale: LanguageIdentifier = "en".parse().unwrap_or_default();
        let mut bundle = FluentBundle::new_concurrent(vec![locale]);
        bundle.set_use_isolating(false);

        // Keep whatever parsed; broken entries show up as missing translations
        let resource = FluentResource::try_new(EN_MESSAGES.to_string())
            .unwrap_or_else(|(resource, _errors)| resource);
        let _ = bundle.add_resource(resource);

        Self { bundle }
    }

    /// Get a localized message
    pub fn get_message(&self, key: &str, args: Option<&HashMap<&str, &str>>) -> String {
        let msg = match self.bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                fluent_args.set(*name, *value);
            }
            fluent_args
        });

        let mut value = String::new();
        let _ = self
            .bundle
            .write_pattern(&mut value, pattern, fluent_args.as_ref(), &mut vec![]);
        value
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message(key, Some(&args_map))
    }
}

impl Default for LocalizationManager {
    fn default() -> Self {
        Self::new()
    }
}

static LOCALIZATION_MANAGER: OnceLock<LocalizationManager> = OnceLock::new();

/// The shared manager, built on first use
pub fn get_localization_manager() -> &'static LocalizationManager {
    LOCALIZATION_MANAGER.get_or_init(LocalizationManager::new)
}

/// Convenience function to get a localized message
pub fn t(key: &str) -> String {
    get_localization_manager().get_message(key, None)
}

/// Convenience function to get a localized message with arguments
pub fn t_args(key: &str, args: &[(&str, &str)]) -> String {
    get_localization_manager().get_message_with_args(key, args)
}

/// Non-technical message for a failed run, with hints when a retry could help
///
/// # Examples
///
/// ```rust
/// use meal_planner::errors::PlannerError;
/// use meal_planner::localization::user_error_message;
///
/// let message = user_error_message(&PlannerError::Network("connection reset".into()));
/// assert!(message.contains("Add more items to your pantry"));
/// assert!(!message.contains("connection reset"));
/// ```
pub fn user_error_message(err: &PlannerError) -> String {
    let (headline, with_hints) = match err {
        PlannerError::MissingApiKey(variable) => (
            t_args("error-missing-api-key", &[("variable", variable.as_str())]),
            false,
        ),
        PlannerError::Cancelled => (t("error-cancelled"), false),
        PlannerError::InvalidPreferences(details) => (
            t_args("error-invalid-preferences", &[("details", details.as_str())]),
            false,
        ),
        PlannerError::Network(_) | PlannerError::Api { .. } => (t("error-network"), true),
        PlannerError::SlotFailed { day, meal, .. } => (
            t_args(
                "error-slot-failed",
                &[("day", day.display_name()), ("meal", meal.as_str())],
            ),
            true,
        ),
        PlannerError::EmptyResponse(_) | PlannerError::Parse(_) | PlannerError::Validation(_) => {
            (t("error-generic"), true)
        }
    };

    if !with_hints {
        return headline;
    }

    let mut message = format!("{}\n\n{}", headline, t("error-hints-title"));
    for key in HINT_KEYS {
        message.push_str("\n- ");
        message.push_str(&t(key));
    }
    message
}
