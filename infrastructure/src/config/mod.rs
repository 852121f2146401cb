//! Configuration file loading for persona-survey
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `PERSONA_SURVEY_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./survey.toml` or `./.survey.toml`
//! 4. Global: `$XDG_CONFIG_HOME/persona-survey/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, ConfigIssueCode, FileConfig, FileDataConfig, FileModelEntry, FileOutputConfig,
    FilePersonasConfig, FileProviderConfig, FileProvidersConfig, FileRetryConfig,
    FileSimulationConfig, Severity, group_models, parse_model_arg,
};
pub use loader::ConfigLoader;
