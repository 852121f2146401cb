//! Input sources: survey definition, persona corpora and prompt templates.
//!
//! All readers are synchronous; they run once at startup before any
//! provider call.

mod personas;
mod survey;
mod template;

pub use personas::{
    GeneralPersonaOptions, load_cognitive_personas, load_general_personas, load_personas,
    load_silicon_personas, sample_general_personas,
};
pub use survey::load_survey;
pub use template::load_template;

use std::path::{Path, PathBuf};
use survey_domain::DomainError;
use thiserror::Error;

/// Errors raised while reading input files
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid content in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: DomainError,
    },
}

pub(crate) fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}
