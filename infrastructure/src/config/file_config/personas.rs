//! Persona generation settings from TOML (`[personas]` section)

use crate::sources::GeneralPersonaOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePersonasConfig {
    /// Number of general personas to synthesize
    pub general_count: usize,
    /// Snippets sampled per general persona
    pub sentences_per_persona: usize,
    /// Fixed seed for reproducible sampling
    pub seed: Option<u64>,
}

impl Default for FilePersonasConfig {
    fn default() -> Self {
        Self {
            general_count: 10,
            sentences_per_persona: 5,
            seed: None,
        }
    }
}

impl FilePersonasConfig {
    pub fn to_options(&self) -> GeneralPersonaOptions {
        GeneralPersonaOptions {
            count: self.general_count,
            sentences_per_persona: self.sentences_per_persona,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_loader_defaults() {
        assert_eq!(
            FilePersonasConfig::default().to_options(),
            GeneralPersonaOptions::default()
        );
    }

    #[test]
    fn test_seed_is_carried() {
        let config: FilePersonasConfig = toml::from_str("general_count = 3\nseed = 7\n").unwrap();
        let options = config.to_options();
        assert_eq!(options.count, 3);
        assert_eq!(options.sentences_per_persona, 5);
        assert_eq!(options.seed, Some(7));
    }
}
