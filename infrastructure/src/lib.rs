//! Infrastructure layer for persona-survey
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod output;
pub mod providers;
pub mod sources;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use logging::JsonlResponseLogger;
pub use output::CsvResultSink;
pub use providers::{
    OpenAiAdapter, ProviderAdapter, RoutingProviderClient, default_adapters, has_adapter,
};
pub use sources::{GeneralPersonaOptions, LoadError, load_personas, load_survey, load_template};
