//! Model selection from TOML (`[[models]]` array)
//!
//! An array of tables rather than a `provider → names` table so that the
//! file order survives merging:
//!
//! ```toml
//! [[models]]
//! provider = "openai"
//! names = ["gpt-4o", "gpt-3.5-turbo"]
//!
//! [[models]]
//! provider = "zhipuai"
//! names = ["glm-4"]
//! ```

use serde::{Deserialize, Serialize};
use survey_domain::ProviderModels;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileModelEntry {
    pub provider: String,
    #[serde(default)]
    pub names: Vec<String>,
}

impl FileModelEntry {
    pub fn new(provider: impl Into<String>, names: &[&str]) -> Self {
        Self {
            provider: provider.into(),
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// Models run when the config names none
pub fn default_models() -> Vec<FileModelEntry> {
    vec![FileModelEntry::new("openai", &["gpt-4o", "gpt-3.5-turbo"])]
}

/// Convert entries to the ordered mapping handed to the simulation
pub fn to_provider_models(entries: &[FileModelEntry]) -> Vec<ProviderModels> {
    entries
        .iter()
        .map(|e| ProviderModels::new(e.provider.trim(), trimmed(&e.names)))
        .collect()
}

fn trimmed(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}

/// Parse a `provider:model` CLI argument
///
/// A bare model name is grouped under the provider inferred from it, or
/// under `"unknown"` when nothing matches.
pub fn parse_model_arg(arg: &str) -> Option<(String, String)> {
    let arg = arg.trim();
    match arg.split_once(':') {
        Some((provider, model)) => {
            let (provider, model) = (provider.trim(), model.trim());
            if provider.is_empty() || model.is_empty() {
                None
            } else {
                Some((provider.to_string(), model.to_string()))
            }
        }
        None if arg.is_empty() => None,
        None => {
            let provider = survey_domain::resolve_provider(arg)
                .map(|k| k.as_str())
                .unwrap_or("unknown");
            Some((provider.to_string(), arg.to_string()))
        }
    }
}

/// Group `(provider, model)` pairs by provider, keeping first-seen order
pub fn group_models(pairs: Vec<(String, String)>) -> Vec<FileModelEntry> {
    let mut entries: Vec<FileModelEntry> = Vec::new();
    for (provider, model) in pairs {
        match entries.iter_mut().find(|e| e.provider == provider) {
            Some(entry) => entry.names.push(model),
            None => entries.push(FileModelEntry {
                provider,
                names: vec![model],
            }),
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_provider_models_keeps_order_and_drops_blanks() {
        let entries = vec![
            FileModelEntry::new("zhipuai", &["glm-4"]),
            FileModelEntry::new("openai", &["gpt-4o", " ", "gpt-4"]),
        ];
        let models = to_provider_models(&entries);
        assert_eq!(models[0].provider, "zhipuai");
        assert_eq!(models[1].models, vec!["gpt-4o", "gpt-4"]);
    }

    #[test]
    fn test_parse_model_arg() {
        assert_eq!(
            parse_model_arg("openai:gpt-4o"),
            Some(("openai".to_string(), "gpt-4o".to_string()))
        );
        assert_eq!(
            parse_model_arg("glm-4"),
            Some(("zhipuai".to_string(), "glm-4".to_string()))
        );
        assert_eq!(
            parse_model_arg("mistral"),
            Some(("unknown".to_string(), "mistral".to_string()))
        );
        assert_eq!(parse_model_arg("openai:"), None);
        assert_eq!(parse_model_arg(""), None);
    }

    #[test]
    fn test_group_models() {
        let entries = group_models(vec![
            ("openai".to_string(), "gpt-4o".to_string()),
            ("zhipuai".to_string(), "glm-4".to_string()),
            ("openai".to_string(), "gpt-4".to_string()),
        ]);
        assert_eq!(
            entries,
            vec![
                FileModelEntry::new("openai", &["gpt-4o", "gpt-4"]),
                FileModelEntry::new("zhipuai", &["glm-4"]),
            ]
        );
    }
}
