//! Data file locations from TOML (`[data]` section)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use survey_domain::PersonaType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDataConfig {
    /// Survey definition (JSON array of questions)
    pub survey: PathBuf,
    /// Snippets for general personas (JSON array of strings)
    pub personachat: PathBuf,
    /// Demographics for silicon personas (CSV)
    pub cgss: PathBuf,
    /// Profiles for cognitive personas (JSON array)
    pub cognitive: PathBuf,
    /// Directory holding `{type}_persona_prompt.txt`
    pub prompt_dir: PathBuf,
    /// Directory receiving `results_{type}_persona.csv`
    pub output_dir: PathBuf,
}

impl Default for FileDataConfig {
    fn default() -> Self {
        Self {
            survey: PathBuf::from("data/survey.json"),
            personachat: PathBuf::from("data/personachat_snippets.json"),
            cgss: PathBuf::from("data/cgss_demographics.csv"),
            cognitive: PathBuf::from("data/cognitive_profiles.json"),
            prompt_dir: PathBuf::from("prompts"),
            output_dir: PathBuf::from("outputs"),
        }
    }
}

impl FileDataConfig {
    /// Persona source file for a persona type
    pub fn persona_source(&self, persona_type: PersonaType) -> &Path {
        match persona_type {
            PersonaType::General => &self.personachat,
            PersonaType::Silicon => &self.cgss,
            PersonaType::Cognitive => &self.cognitive,
        }
    }

    pub fn prompt_path(&self, persona_type: PersonaType) -> PathBuf {
        self.prompt_dir.join(persona_type.prompt_file_name())
    }

    pub fn output_path(&self, persona_type: PersonaType) -> PathBuf {
        self.output_dir.join(persona_type.result_file_name())
    }
}
