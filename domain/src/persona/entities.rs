//! Persona entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// How a persona's description was synthesized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaType {
    /// Random sample of generic conversational snippets
    General,
    /// Derived from a row of demographic survey data
    Silicon,
    /// Rich profile with personality, values and narrative memory
    Cognitive,
}

impl PersonaType {
    /// All persona types in run order
    pub fn all() -> [PersonaType; 3] {
        [
            PersonaType::General,
            PersonaType::Silicon,
            PersonaType::Cognitive,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaType::General => "general",
            PersonaType::Silicon => "silicon",
            PersonaType::Cognitive => "cognitive",
        }
    }

    /// Prompt template file name inside the prompt directory
    pub fn prompt_file_name(&self) -> String {
        format!("{}_persona_prompt.txt", self.as_str())
    }

    /// Result file name inside the output directory
    pub fn result_file_name(&self) -> String {
        format!("results_{}_persona.csv", self.as_str())
    }

    /// Prefix for generated persona ids when the source has none
    pub fn id_prefix(&self) -> &'static str {
        match self {
            PersonaType::General => "gen",
            PersonaType::Silicon => "sil",
            PersonaType::Cognitive => "cog",
        }
    }
}

impl std::fmt::Display for PersonaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PersonaType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(PersonaType::General),
            "silicon" | "demographic" => Ok(PersonaType::Silicon),
            "cognitive" => Ok(PersonaType::Cognitive),
            other => Err(DomainError::UnknownPersonaType(other.to_string())),
        }
    }
}

/// A synthesized respondent (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub description: String,
}

impl Persona {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }

    /// Generated id for the `index`-th (0-based) persona of a type
    pub fn generated_id(persona_type: PersonaType, index: usize) -> String {
        format!("{}_{}", persona_type.id_prefix(), index + 1)
    }
}
