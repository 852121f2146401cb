//! Provider adapters
//!
//! Each [`ProviderAdapter`] speaks one vendor's HTTP API. The
//! [`RoutingProviderClient`] picks the adapter for a model and wraps the
//! call in the rate-limit retry loop.

pub mod openai;
pub mod retry;
pub mod routing;

pub use openai::OpenAiAdapter;
pub use retry::with_retry;
pub use routing::RoutingProviderClient;

use async_trait::async_trait;
use std::sync::Arc;
use survey_application::ports::provider_client::{GatewayError, GenerationParams};
use survey_domain::{ProviderConfig, ProviderKind};
use tracing::warn;

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Single attempt, no retry
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        params: &GenerationParams,
    ) -> Result<String, GatewayError>;
}

/// Adapters available for the given provider settings.
///
/// OpenAI is always registered. OpenAI-compatible servers share its
/// credentials and need an explicit `providers.openai.base_url`.
pub fn default_adapters(config: &ProviderConfig) -> Vec<Arc<dyn ProviderAdapter>> {
    let mut adapters: Vec<Arc<dyn ProviderAdapter>> = vec![Arc::new(OpenAiAdapter::new(
        ProviderKind::OpenAi,
        config.endpoint(ProviderKind::OpenAi),
    ))];

    let compatible = config.endpoint(ProviderKind::OpenAiCompatible);
    if compatible.base_url.is_some() {
        adapters.push(Arc::new(OpenAiAdapter::new(
            ProviderKind::OpenAiCompatible,
            compatible,
        )));
    } else {
        warn!("providers.openai.base_url is not set; open-weight models are unavailable");
    }

    adapters
}

/// Whether [`default_adapters`] registers an adapter for `kind` under `config`
pub fn has_adapter(config: &ProviderConfig, kind: ProviderKind) -> bool {
    match kind {
        ProviderKind::OpenAi => true,
        ProviderKind::OpenAiCompatible => config.endpoint(kind).base_url.is_some(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_domain::ProviderEndpoint;

    #[test]
    fn test_compatible_adapter_needs_base_url() {
        let kinds = |config: &ProviderConfig| -> Vec<ProviderKind> {
            default_adapters(config).iter().map(|a| a.kind()).collect()
        };

        assert_eq!(kinds(&ProviderConfig::default()), vec![ProviderKind::OpenAi]);

        let config = ProviderConfig {
            openai: ProviderEndpoint {
                base_url: Some("http://localhost:8000/v1".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            kinds(&config),
            vec![ProviderKind::OpenAi, ProviderKind::OpenAiCompatible]
        );
    }

    #[test]
    fn test_has_adapter_matches_registered_adapters() {
        let without_url = ProviderConfig::default();
        let with_url = ProviderConfig {
            openai: ProviderEndpoint {
                base_url: Some("http://localhost:8000/v1".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        for config in [&without_url, &with_url] {
            let registered: Vec<ProviderKind> =
                default_adapters(config).iter().map(|a| a.kind()).collect();
            for kind in [
                ProviderKind::OpenAi,
                ProviderKind::OpenAiCompatible,
                ProviderKind::Anthropic,
                ProviderKind::Google,
                ProviderKind::ZhipuAi,
                ProviderKind::Baidu,
            ] {
                assert_eq!(has_adapter(config, kind), registered.contains(&kind));
            }
        }
        assert!(!has_adapter(&without_url, ProviderKind::OpenAiCompatible));
        assert!(has_adapter(&with_url, ProviderKind::OpenAiCompatible));
    }
}
