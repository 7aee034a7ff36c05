//! # Amount Parsing Module
//!
//! Turns free-text quantities such as "1/2 cup", "2.5 kg" or "3" into a
//! numeric value plus a canonical unit. Parsing never fails: anything that
//! does not start with a number degrades to a quantity of one.

use crate::units::normalize_unit;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Leading numeric or fractional token, then an optional unit token
    static ref AMOUNT_REGEX: Regex = Regex::new(
        r"(?i)^\s*([\d./]+)\s*(fl\.?\s*oz|fluid\s+ounces?|[a-z]+)?"
    )
    .expect("Amount pattern should be valid");
}

/// A parsed quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    /// Numeric value, 1.0 when nothing numeric could be read
    pub value: f64,
    /// Canonical unit, empty for counts
    pub unit: String,
}

impl Amount {
    /// The quantity used when a string carries no number
    pub fn one() -> Self {
        Self {
            value: 1.0,
            unit: String::new(),
        }
    }
}

/// Parse an amount string into a value and canonical unit
///
/// # Examples
///
/// ```rust
/// use meal_planner::amount::parse_amount;
///
/// let amount = parse_amount("1/2 cup");
/// assert_eq!(amount.value, 0.5);
/// assert_eq!(amount.unit, "cups");
///
/// let amount = parse_amount("a pinch");
/// assert_eq!(amount.value, 1.0);
/// assert_eq!(amount.unit, "");
/// ```
pub fn parse_amount(amount_text: &str) -> Amount {
    let Some(captures) = AMOUNT_REGEX.captures(amount_text) else {
        trace!("No numeric prefix in amount '{}', defaulting to 1", amount_text);
        return Amount::one();
    };

    let value = parse_numeric_token(&captures[1]);
    let unit = captures
        .get(2)
        .map(|m| normalize_unit(m.as_str()))
        .unwrap_or_default();

    trace!("Parsed amount '{}' -> {} '{}'", amount_text, value, unit);
    Amount { value, unit }
}

/// Convert a numeric token, folding fractions left to right
///
/// "1/2/3" evaluates as (1/2)/3. Tokens that do not produce a finite number
/// (".", "1/", "4/0") come back as 1.0.
pub fn parse_numeric_token(token: &str) -> f64 {
    let value = token
        .split('/')
        .map(|part| part.parse::<f64>().unwrap_or(f64::NAN))
        .reduce(|numerator, denominator| numerator / denominator)
        .unwrap_or(f64::NAN);

    if value.is_finite() {
        value
    } else {
        1.0
    }
}

/// Fixed two-decimal rendering used inside parsed grocery lists ("2.00")
pub fn format_decimal(value: f64) -> String {
    format!("{:.2}", value)
}

/// At most two decimals with trailing zeros removed ("3", "0.5", "1.25")
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Round to two decimals the way summed grocery amounts are stored
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
