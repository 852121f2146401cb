//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types at
//! the edge (`to_params`, `to_policy`, `to_provider_config`).

mod data;
mod models;
mod output;
mod personas;
mod providers;
mod retry;
mod simulation;

pub use data::FileDataConfig;
pub use models::{FileModelEntry, default_models, group_models, parse_model_arg, to_provider_models};
pub use output::FileOutputConfig;
pub use personas::FilePersonasConfig;
pub use providers::{FileProviderConfig, FileProvidersConfig};
pub use retry::FileRetryConfig;
pub use simulation::FileSimulationConfig;

use serde::{Deserialize, Serialize};
use survey_domain::{ProviderKind, ProviderModels};

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the run cannot start.
    Error,
    /// Non-fatal: the run starts but some calls will fail.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    TemperatureOutOfRange,
    ZeroMaxTokens,
    ZeroRetryAttempts,
    NoModels,
    EmptyModelName { provider: String },
    UnknownProvider { provider: String },
    UnroutableModel { model: String },
    ProviderNotImplemented { model: String, provider: ProviderKind },
    PlaceholderApiKey { provider: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Generation settings and pacing
    pub simulation: FileSimulationConfig,
    /// Rate-limit retry policy
    pub retry: FileRetryConfig,
    /// Ordered provider → model list
    pub models: Vec<FileModelEntry>,
    /// Credentials, endpoints and routing overrides
    pub providers: FileProvidersConfig,
    /// Input and output locations
    pub data: FileDataConfig,
    /// Persona synthesis settings
    pub personas: FilePersonasConfig,
    /// Optional transcript output
    pub output: FileOutputConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            simulation: FileSimulationConfig::default(),
            retry: FileRetryConfig::default(),
            models: default_models(),
            providers: FileProvidersConfig::default(),
            data: FileDataConfig::default(),
            personas: FilePersonasConfig::default(),
            output: FileOutputConfig::default(),
        }
    }
}

impl FileConfig {
    /// Models in call order
    pub fn provider_models(&self) -> Vec<ProviderModels> {
        to_provider_models(&self.models)
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// `has_adapter` reports whether a provider kind can actually be called.
    pub fn validate(&self, has_adapter: impl Fn(ProviderKind) -> bool) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Simulation parameters
        let temperature = self.simulation.temperature;
        if !(0.0..=1.0).contains(&temperature) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::TemperatureOutOfRange,
                format!("simulation.temperature must be within [0, 1], got {}", temperature),
            ));
        }
        if self.simulation.max_tokens == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroMaxTokens,
                "simulation.max_tokens cannot be 0",
            ));
        }
        if self.retry.max_attempts == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroRetryAttempts,
                "retry.max_attempts is 0, each call will be tried once",
            ));
        }

        // 2. Models and their routing
        if self.models.iter().all(|e| e.names.is_empty()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoModels,
                "no models configured in [[models]]",
            ));
        }

        let routing = self.providers.resolve_with(&|_| None);
        for entry in &self.models {
            if entry.provider.parse::<ProviderKind>().is_err() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownProvider {
                        provider: entry.provider.clone(),
                    },
                    format!("[[models]] provider '{}' is not supported", entry.provider),
                ));
            }

            for name in &entry.names {
                let name = name.trim();
                if name.is_empty() {
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::EmptyModelName {
                            provider: entry.provider.clone(),
                        },
                        format!("[[models]] provider '{}' lists an empty model name", entry.provider),
                    ));
                    continue;
                }

                match routing.route(name) {
                    None => issues.push(ConfigIssue::warning(
                        ConfigIssueCode::UnroutableModel {
                            model: name.to_string(),
                        },
                        format!(
                            "cannot infer a provider for model '{}', add it to [providers.routing]",
                            name
                        ),
                    )),
                    Some(kind) if !has_adapter(kind) => issues.push(ConfigIssue::warning(
                        ConfigIssueCode::ProviderNotImplemented {
                            model: name.to_string(),
                            provider: kind,
                        },
                        format!(
                            "model '{}' routes to provider '{}', which has no client yet; its rows will be NO_RESPONSE",
                            name, kind
                        ),
                    )),
                    Some(_) => {}
                }
            }
        }

        // 3. Leftover template keys
        for (name, provider) in self.providers.entries() {
            if provider
                .api_key
                .as_deref()
                .is_some_and(|k| k.trim().starts_with("YOUR_"))
            {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::PlaceholderApiKey {
                        provider: name.to_string(),
                    },
                    format!("providers.{}.api_key is still a placeholder", name),
                ));
            }
        }

        issues
    }
}
