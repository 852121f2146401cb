//! Domain layer for persona-survey
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Survey
//!
//! An ordered list of [`Question`]s. Each (persona, model) exchange produces
//! one [`AnswerVector`] with exactly one slot per question, filled either with
//! the extracted answer or with a [`Sentinel`].
//!
//! ## Persona
//!
//! A first-person description used to condition the model. The three
//! [`PersonaType`]s differ only in how the description was synthesized.
//!
//! ## Response parsing
//!
//! [`parse_response`] turns a free-text model reply into an [`AnswerVector`].
//! Malformed lines never fail the parse; they degrade to [`ParseIssue`]s and
//! `MISSING` slots.

pub mod core;
pub mod persona;
pub mod prompt;
pub mod providers;
pub mod survey;

// Re-export commonly used types
pub use core::error::DomainError;
pub use persona::{
    entities::{Persona, PersonaType},
    profile::{CognitiveProfile, DemographicProfile, Personality},
};
pub use prompt::PromptTemplate;
pub use providers::{
    ProviderConfig, ProviderEndpoint, ProviderKind, ProviderModels, resolve_provider,
};
pub use survey::{
    answer::{AnswerVector, Sentinel},
    format::format_survey,
    parsing::{LineFault, ParseIssue, ParseReport, parse_response, parse_response_with_report},
    question::{Question, Survey},
    row::OutputRow,
};
