//! Prompt domain
//!
//! Persona prompt templates and their placeholder substitution.

mod template;

pub use template::{
    DEFAULT_SYSTEM_PROMPT, PERSONA_DESCRIPTION, PromptTemplate, SURVEY_QUESTIONS_FORMATTED,
};
