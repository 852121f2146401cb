//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use survey_domain::{ProviderConfig, ProviderEndpoint};

/// Credentials and endpoint for one provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Direct API key, used only when the environment variable is unset.
    pub api_key: Option<String>,
    /// `None` means the vendor's official endpoint.
    pub base_url: Option<String>,
}

impl FileProviderConfig {
    fn with_env(api_key_env: &str) -> Self {
        Self {
            api_key_env: api_key_env.to_string(),
            ..Default::default()
        }
    }

    fn resolve(&self, env: &dyn Fn(&str) -> Option<String>) -> ProviderEndpoint {
        let from_env = |name: &str| {
            if name.is_empty() {
                None
            } else {
                env(name).filter(|v| !v.trim().is_empty())
            }
        };
        ProviderEndpoint {
            api_key: from_env(&self.api_key_env).or_else(|| self.api_key.clone()),
            base_url: self
                .base_url
                .as_ref()
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .filter(|u| !u.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub openai: FileProviderConfig,
    pub anthropic: FileProviderConfig,
    pub google: FileProviderConfig,
    pub zhipuai: FileProviderConfig,
    pub baidu: FileProviderConfig,
    /// Explicit model → provider routing overrides.
    pub routing: HashMap<String, String>,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            openai: FileProviderConfig {
                base_url: Some("https://api.openai.com/v1".to_string()),
                ..FileProviderConfig::with_env("OPENAI_API_KEY")
            },
            anthropic: FileProviderConfig::with_env("ANTHROPIC_API_KEY"),
            google: FileProviderConfig::with_env("GOOGLE_API_KEY"),
            zhipuai: FileProviderConfig::with_env("ZHIPUAI_API_KEY"),
            baidu: FileProviderConfig::with_env("BAIDU_API_KEY"),
            routing: HashMap::new(),
        }
    }
}

impl FileProvidersConfig {
    /// Resolve keys from the process environment.
    pub fn to_provider_config(&self) -> ProviderConfig {
        self.resolve_with(&|name| std::env::var(name).ok())
    }

    /// Resolve keys with an explicit environment lookup.
    pub fn resolve_with(&self, env: &dyn Fn(&str) -> Option<String>) -> ProviderConfig {
        ProviderConfig {
            openai: self.openai.resolve(env),
            anthropic: self.anthropic.resolve(env),
            google: self.google.resolve(env),
            zhipuai: self.zhipuai.resolve(env),
            baidu: self.baidu.resolve(env),
            routing: self.routing.clone(),
        }
    }

    /// `(section name, config)` pairs for iteration
    pub fn entries(&self) -> [(&'static str, &FileProviderConfig); 5] {
        [
            ("openai", &self.openai),
            ("anthropic", &self.anthropic),
            ("google", &self.google),
            ("zhipuai", &self.zhipuai),
            ("baidu", &self.baidu),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_env_key_preferred_over_file_key() {
        let mut config = FileProvidersConfig::default();
        config.openai.api_key = Some("sk-file".to_string());

        let resolved = config.resolve_with(&env(&[("OPENAI_API_KEY", "sk-env")]));
        assert_eq!(resolved.openai.api_key.as_deref(), Some("sk-env"));

        let resolved = config.resolve_with(&env(&[]));
        assert_eq!(resolved.openai.api_key.as_deref(), Some("sk-file"));
    }

    #[test]
    fn test_baidu_key_and_base_url() {
        let mut config = FileProvidersConfig::default();
        config.zhipuai.base_url = Some("https://open.bigmodel.cn/api/paas/v4/".to_string());

        let resolved = config.resolve_with(&env(&[("BAIDU_API_KEY", "ak")]));
        assert_eq!(resolved.baidu.api_key.as_deref(), Some("ak"));
        assert_eq!(
            resolved.zhipuai.base_url.as_deref(),
            Some("https://open.bigmodel.cn/api/paas/v4")
        );
        assert!(resolved.anthropic.base_url.is_none());
    }

    #[test]
    fn test_routing_is_carried() {
        let toml_str = r#"
[providers.routing]
"my-llama" = "openai_compatible"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let resolved = config.providers.resolve_with(&env(&[]));
        assert_eq!(
            resolved.routing.get("my-llama").map(String::as_str),
            Some("openai_compatible")
        );
    }
}
