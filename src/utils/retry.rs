//! Retry timing for the page fetcher
//!
//! Two delay rules apply:
//! - after a 503 response: `(2^attempt + jitter) * unit`
//! - after a transport failure or timeout: `(1 + jitter) * unit`
//!
//! `jitter` is drawn uniformly from `[0, 1)`. The unit is one second in
//! production and a few milliseconds in tests.

use rand::Rng;
use std::time::Duration;

use crate::config::CrawlerConfig;

/// Retry behaviour of the fetcher
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts per URL (first try included)
    pub max_attempts: u32,

    /// Time unit the backoff formulas are expressed in
    pub unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with a custom attempt budget and backoff unit
    pub fn new(max_attempts: u32, unit: Duration) -> Self {
        Self { max_attempts, unit }
    }

    /// Build the policy from the crawler section of the configuration
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            unit: Duration::from_millis(config.backoff_unit_ms),
        }
    }

    /// Deterministic part of the 503 backoff for a zero-based attempt
    pub fn backoff_floor(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.min(16));
        self.unit.saturating_mul(factor)
    }

    /// Delay after a 503 response on the given zero-based attempt
    pub fn service_unavailable_delay(&self, attempt: u32, jitter: f64) -> Duration {
        self.backoff_floor(attempt) + self.unit.mul_f64(clamp_jitter(jitter))
    }

    /// Delay after a transport failure or timeout
    pub fn transport_delay(&self, jitter: f64) -> Duration {
        self.unit + self.unit.mul_f64(clamp_jitter(jitter))
    }

    /// Whether another attempt remains after `attempt` (zero-based)
    pub fn has_next(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts
    }
}

/// Draw backoff jitter uniformly from `[0, 1)`
pub fn jitter() -> f64 {
    rand::thread_rng().gen::<f64>()
}

fn clamp_jitter(jitter: f64) -> f64 {
    if jitter.is_finite() {
        jitter.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_backoff_floor_doubles() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.backoff_floor(0), Duration::from_secs(1));
        assert_eq!(policy.backoff_floor(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_floor(2), Duration::from_secs(4));
    }

    #[test]
    fn test_service_unavailable_delay_adds_jitter() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100));

        assert_eq!(
            policy.service_unavailable_delay(1, 0.5),
            Duration::from_millis(250)
        );
        assert_eq!(
            policy.service_unavailable_delay(0, 0.0),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_transport_delay_is_flat() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100));

        assert_eq!(policy.transport_delay(0.0), Duration::from_millis(100));
        assert_eq!(policy.transport_delay(0.25), Duration::from_millis(125));
        assert_eq!(policy.transport_delay(f64::NAN), Duration::from_millis(100));
    }

    #[test]
    fn test_has_next() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));

        assert!(policy.has_next(0));
        assert!(policy.has_next(1));
        assert!(!policy.has_next(2));
    }

    #[test]
    fn test_jitter_range() {
        for _ in 0..1000 {
            let j = jitter();
            assert!((0.0..1.0).contains(&j));
        }
    }

    proptest! {
        #[test]
        fn prop_backoff_floor_non_decreasing(attempt in 0u32..40, unit_ms in 1u64..2000) {
            let policy = RetryPolicy::new(3, Duration::from_millis(unit_ms));
            prop_assert!(policy.backoff_floor(attempt) <= policy.backoff_floor(attempt + 1));
        }

        #[test]
        fn prop_jittered_delay_within_one_unit(attempt in 0u32..10, jitter in 0.0f64..1.0) {
            let policy = RetryPolicy::new(3, Duration::from_millis(10));
            let delay = policy.service_unavailable_delay(attempt, jitter);
            prop_assert!(delay >= policy.backoff_floor(attempt));
            prop_assert!(delay <= policy.backoff_floor(attempt) + policy.unit);
        }
    }
}
