//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Survey has no questions")]
    EmptySurvey,

    #[error("Invalid question id {0}: ids must be positive")]
    InvalidQuestionId(u32),

    #[error("Duplicate question id {0}")]
    DuplicateQuestionId(u32),

    #[error("Unknown template placeholder: {{{0}}}")]
    UnknownPlaceholder(String),

    #[error("Malformed template: {0}")]
    MalformedTemplate(String),

    #[error("Unknown persona type: {0}")]
    UnknownPersonaType(String),
}
