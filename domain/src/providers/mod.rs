//! Provider configuration types (provider-neutral, serde-free).
//!
//! These types define the shape of provider settings without depending
//! on any serialization format (TOML, JSON, etc.), plus the pure
//! model-name → provider resolution used to route each request.

use std::collections::HashMap;

/// LLM vendor families that can serve a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Google,
    ZhipuAi,
    Baidu,
    /// Open-weight models behind an OpenAI-compatible endpoint (vLLM, Ollama, ...)
    OpenAiCompatible,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Google => "google",
            ProviderKind::ZhipuAi => "zhipuai",
            ProviderKind::Baidu => "baidu",
            ProviderKind::OpenAiCompatible => "openai_compatible",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "google" | "gemini" => Ok(ProviderKind::Google),
            "zhipuai" | "zhipu" => Ok(ProviderKind::ZhipuAi),
            "baidu" | "qianfan" => Ok(ProviderKind::Baidu),
            "openai_compatible" | "openai-compatible" => Ok(ProviderKind::OpenAiCompatible),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

/// Infer the provider from a model name.
///
/// | Rule | Provider |
/// |------|----------|
/// | starts with `gpt` | OpenAI |
/// | contains `claude` | Anthropic |
/// | contains `gemini` | Google |
/// | starts with `glm` | ZhipuAI |
/// | starts with `ernie` | Baidu |
/// | contains `Llama-3`, `Qwen2` or `DeepSeek` | OpenAI-compatible |
///
/// Rules are checked top to bottom; `None` means the model is unknown.
pub fn resolve_provider(model_name: &str) -> Option<ProviderKind> {
    if model_name.starts_with("gpt") {
        Some(ProviderKind::OpenAi)
    } else if model_name.contains("claude") {
        Some(ProviderKind::Anthropic)
    } else if model_name.contains("gemini") {
        Some(ProviderKind::Google)
    } else if model_name.starts_with("glm") {
        Some(ProviderKind::ZhipuAi)
    } else if model_name.starts_with("ernie") {
        Some(ProviderKind::Baidu)
    } else if ["Llama-3", "Qwen2", "DeepSeek"]
        .iter()
        .any(|family| model_name.contains(family))
    {
        Some(ProviderKind::OpenAiCompatible)
    } else {
        None
    }
}

/// Credentials and endpoint for one provider
#[derive(Debug, Clone, Default)]
pub struct ProviderEndpoint {
    pub api_key: Option<String>,
    /// `None` means the vendor's official endpoint
    pub base_url: Option<String>,
}

impl ProviderEndpoint {
    /// The API key, if it is set and not a `YOUR_...` template placeholder
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && !k.starts_with("YOUR_"))
    }
}

/// Top-level provider configuration.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub openai: ProviderEndpoint,
    pub anthropic: ProviderEndpoint,
    pub google: ProviderEndpoint,
    pub zhipuai: ProviderEndpoint,
    pub baidu: ProviderEndpoint,
    /// Explicit model → provider routing overrides.
    pub routing: HashMap<String, String>,
}

impl ProviderConfig {
    /// Endpoint settings for a provider kind.
    ///
    /// OpenAI-compatible models share the OpenAI credentials and base URL.
    pub fn endpoint(&self, kind: ProviderKind) -> &ProviderEndpoint {
        match kind {
            ProviderKind::OpenAi | ProviderKind::OpenAiCompatible => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::Google => &self.google,
            ProviderKind::ZhipuAi => &self.zhipuai,
            ProviderKind::Baidu => &self.baidu,
        }
    }

    /// Resolve the provider for a model: explicit routing first, then
    /// [`resolve_provider`]. Unknown routing targets are ignored.
    pub fn route(&self, model_name: &str) -> Option<ProviderKind> {
        self.routing
            .get(model_name)
            .and_then(|name| name.parse().ok())
            .or_else(|| resolve_provider(model_name))
    }
}

/// Models to run for one provider, in configured order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderModels {
    pub provider: String,
    pub models: Vec<String>,
}

impl ProviderModels {
    pub fn new(provider: impl Into<String>, models: Vec<String>) -> Self {
        Self {
            provider: provider.into(),
            models,
        }
    }
}
