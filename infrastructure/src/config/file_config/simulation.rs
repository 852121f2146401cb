//! Simulation configuration from TOML (`[simulation]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use survey_application::SimulationParams;
use survey_domain::prompt::DEFAULT_SYSTEM_PROMPT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSimulationConfig {
    /// Sampling temperature, `[0, 1]`
    pub temperature: f32,
    /// Max tokens per reply
    pub max_tokens: u32,
    /// Pause after each successful call, in seconds
    pub request_delay_secs: f64,
    pub system_prompt: String,
}

impl Default for FileSimulationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            max_tokens: 500,
            request_delay_secs: 1.0,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl FileSimulationConfig {
    pub fn to_params(&self) -> SimulationParams {
        SimulationParams::default()
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
            .with_request_delay(secs(self.request_delay_secs))
            .with_system_prompt(self.system_prompt.clone())
    }
}

/// Seconds as a `Duration`; negative or non-finite values become zero,
/// values beyond `Duration::MAX` saturate
pub(super) fn secs(value: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::try_from_secs_f64(value).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}
