//! Retry configuration from TOML (`[retry]` section)

use super::simulation::secs;
use serde::{Deserialize, Serialize};
use survey_application::RetryPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    /// Total attempts per call, including the first
    pub max_attempts: u32,
    pub initial_backoff_secs: f64,
    pub multiplier: f64,
    pub max_backoff_secs: f64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_secs: 5.0,
            multiplier: 2.0,
            max_backoff_secs: 60.0,
        }
    }
}

impl FileRetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            initial_backoff: secs(self.initial_backoff_secs),
            multiplier: self.multiplier,
            max_backoff: secs(self.max_backoff_secs),
        }
    }
}
