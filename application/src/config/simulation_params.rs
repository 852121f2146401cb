//! Simulation parameters: generation settings and pacing.
//!
//! [`SimulationParams`] groups the static parameters that control each
//! provider call made by
//! [`RunSimulationUseCase`](crate::use_cases::run_simulation::RunSimulationUseCase).

use crate::ports::provider_client::GenerationParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use survey_domain::prompt::DEFAULT_SYSTEM_PROMPT;

/// Per-call generation settings plus the courtesy delay between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Sampling temperature in `[0, 1]`.
    pub temperature: f32,
    /// Upper bound on tokens per reply.
    pub max_tokens: u32,
    /// Pause after every successful call, before the next one.
    pub request_delay: Duration,
    /// System message sent with every persona prompt.
    pub system_prompt: String,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            max_tokens: 500,
            request_delay: Duration::from_secs(1),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl SimulationParams {
    // ==================== Builder Methods ====================

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 1.0);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// The subset handed to the provider client on every call
    pub fn generation(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            system_prompt: self.system_prompt.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = SimulationParams::default();
        assert_eq!(params.temperature, 0.8);
        assert_eq!(params.max_tokens, 500);
        assert_eq!(params.request_delay, Duration::from_secs(1));
        assert_eq!(params.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_builder() {
        let params = SimulationParams::default()
            .with_temperature(1.7)
            .with_max_tokens(256)
            .with_request_delay(Duration::ZERO);

        assert_eq!(params.temperature, 1.0);
        assert_eq!(params.max_tokens, 256);
        assert!(params.request_delay.is_zero());
    }

    #[test]
    fn test_generation_subset() {
        let generation = SimulationParams::default()
            .with_system_prompt("sys")
            .generation();
        assert_eq!(generation.max_tokens, 500);
        assert_eq!(generation.system_prompt, "sys");
    }
}
