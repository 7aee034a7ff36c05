//! # Circuit Breaker Module
//!
//! This module implements the circuit breaker pattern for generation
//! requests. When the generation service keeps failing at the network layer,
//! a lenient plan run stops instead of filling every remaining slot with a
//! fallback recipe.

use crate::errors::PlannerError;

/// Consecutive network-failure counter for one plan run
///
/// # State Machine
///
/// - **Closed**: fewer than `threshold` consecutive network failures
/// - **Open**: `threshold` reached, the run should stop
///
/// A successful generation call closes the breaker again. Failures that are
/// not network failures (empty responses, parse errors) do not count.
///
/// # Examples
///
/// ```rust
/// use meal_planner::circuit_breaker::CircuitBreaker;
/// use meal_planner::errors::PlannerError;
///
/// let mut breaker = CircuitBreaker::new(2);
/// breaker.record::<()>(&Err(PlannerError::Network("timeout".into())));
/// assert!(!breaker.is_open());
/// breaker.record::<()>(&Err(PlannerError::Network("timeout".into())));
/// assert!(breaker.is_open());
/// ```
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    threshold: u32,
    consecutive_failures: u32,
    last_failure: Option<PlannerError>,
}

impl CircuitBreaker {
    /// A threshold of 0 never opens
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            consecutive_failures: 0,
            last_failure: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.threshold > 0 && self.consecutive_failures >= self.threshold
    }

    /// Update the counter from the outcome of one generation call
    pub fn record<T>(&mut self, outcome: &Result<T, PlannerError>) {
        match outcome {
            Ok(_) => self.record_success(),
            Err(err) if err.is_network() => self.record_failure(err.clone()),
            Err(_) => {}
        }
    }

    pub fn record_failure(&mut self, err: PlannerError) {
        self.consecutive_failures += 1;
        self.last_failure = Some(err);
    }

    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
        self.last_failure = None;
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// The network error that tripped the breaker
    pub fn last_failure(&self) -> Option<&PlannerError> {
        self.last_failure.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_resets_count() {
        let mut breaker = CircuitBreaker::new(3);
        breaker.record::<()>(&Err(PlannerError::Network("reset".into())));
        breaker.record::<()>(&Err(PlannerError::Api {
            status: 503,
            body: "unavailable".into(),
        }));
        assert_eq!(breaker.consecutive_failures(), 2);

        breaker.record(&Ok("text"));
        assert_eq!(breaker.consecutive_failures(), 0);
        assert!(breaker.last_failure().is_none());
    }

    #[test]
    fn test_non_network_errors_do_not_count() {
        let mut breaker = CircuitBreaker::new(1);
        breaker.record::<()>(&Err(PlannerError::EmptyResponse("blocked".into())));
        assert!(!breaker.is_open());
    }

    #[test]
    fn test_zero_threshold_never_opens() {
        let mut breaker = CircuitBreaker::new(0);
        for _ in 0..10 {
            breaker.record_failure(PlannerError::Network("down".into()));
        }
        assert!(!breaker.is_open());
    }

    #[test]
    fn test_opens_at_threshold_and_keeps_last_error() {
        let mut breaker = CircuitBreaker::new(2);
        breaker.record_failure(PlannerError::Network("first".into()));
        breaker.record_failure(PlannerError::Network("second".into()));

        assert!(breaker.is_open());
        assert!(matches!(
            breaker.last_failure(),
            Some(PlannerError::Network(msg)) if msg == "second"
        ));
    }
}
