//! Retry policy for rate-limited provider calls.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounded exponential backoff.
///
/// Attempts are numbered from 1. After a failed attempt `n`, the caller waits
/// [`backoff_for(n)`](RetryPolicy::backoff_for) and tries again, as long as
/// [`should_retry(n)`](RetryPolicy::should_retry) holds.
///
/// | Attempt failed | Wait (defaults) |
/// |----------------|-----------------|
/// | 1 | 5s |
/// | 2 | 10s |
/// | 3 | 20s |
/// | 4 | 40s |
/// | 5 | give up |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one. `1` disables retries.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub multiplier: f64,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_secs(5),
            multiplier: 2.0,
            max_backoff: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Same wait after every failure
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff: delay,
            multiplier: 1.0,
            max_backoff: delay,
        }
    }

    /// Whether another attempt is allowed after `attempt` failed
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Wait after the `attempt`-th failure, capped at `max_backoff`
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let factor = self.multiplier.max(1.0).powi(exponent);
        let secs = self.initial_backoff.as_secs_f64() * factor;
        if !secs.is_finite() || secs >= self.max_backoff.as_secs_f64() {
            self.max_backoff
        } else {
            Duration::try_from_secs_f64(secs).unwrap_or(self.max_backoff)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_cap_does_not_overflow() {
        let policy = RetryPolicy {
            max_attempts: 3,
            initial_backoff: Duration::MAX,
            multiplier: 2.0,
            max_backoff: Duration::MAX,
        };
        assert_eq!(policy.backoff_for(1), Duration::MAX);
        assert_eq!(policy.backoff_for(3), Duration::MAX);
    }

    #[test]
    fn test_default_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_for(1), Duration::from_secs(5));
        assert_eq!(policy.backoff_for(2), Duration::from_secs(10));
        assert_eq!(policy.backoff_for(3), Duration::from_secs(20));
        assert_eq!(policy.backoff_for(4), Duration::from_secs(40));
        assert!(policy.should_retry(4));
        assert!(!policy.should_retry(5));
    }

    #[test]
    fn test_backoff_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_for(5), Duration::from_secs(60));
        assert_eq!(policy.backoff_for(1000), Duration::from_secs(60));
    }

    #[test]
    fn test_fixed() {
        let policy = RetryPolicy::fixed(3, Duration::from_millis(250));
        assert_eq!(policy.backoff_for(1), Duration::from_millis(250));
        assert_eq!(policy.backoff_for(2), Duration::from_millis(250));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));
    }

    #[test]
    fn test_no_retry() {
        assert!(!RetryPolicy::no_retry().should_retry(1));
    }

    #[test]
    fn test_multiplier_below_one_is_treated_as_fixed() {
        let policy = RetryPolicy {
            multiplier: 0.5,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.backoff_for(3), Duration::from_secs(5));
    }
}
