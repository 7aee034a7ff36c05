//! # Meal Planner
//!
//! Builds a weekly meal plan and a consolidated grocery list from a
//! household's food preferences, using an external text-generation service
//! for the recipes.
//!
//! The interesting part is turning loosely structured model output into
//! validated recipes ([`recipe_parser`]) and merging many recipes into one
//! de-duplicated shopping list ([`grocery`]). [`orchestrator`] drives the
//! per-slot generation loop.

pub mod amount;
pub mod catalog;
pub mod circuit_breaker;
pub mod config;
pub mod cuisine;
pub mod errors;
pub mod export;
pub mod fallback;
pub mod generation_client;
pub mod grocery;
pub mod localization;
pub mod orchestrator;
pub mod prompt;
pub mod recipe_model;
pub mod recipe_parser;
pub mod units;
