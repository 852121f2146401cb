use super::{ProviderAdapter, with_retry};
use async_trait::async_trait;
use std::sync::Arc;
use survey_application::RetryPolicy;
use survey_application::ports::provider_client::{GatewayError, GenerationParams, ProviderClient};
use survey_domain::{ProviderConfig, ProviderKind};
use tracing::debug;

/// [`ProviderClient`] that dispatches each model to the adapter of its
/// provider and retries rate-limited calls.
pub struct RoutingProviderClient {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    config: ProviderConfig,
    retry: RetryPolicy,
}

impl RoutingProviderClient {
    pub fn new(
        adapters: Vec<Arc<dyn ProviderAdapter>>,
        config: ProviderConfig,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            adapters,
            config,
            retry,
        }
    }

    /// Routing priority:
    ///  1. `[providers.routing]` entry for the model
    ///  2. model-family inference ([`survey_domain::resolve_provider`])
    ///  3. otherwise `ModelNotAvailable`
    ///
    /// A resolved kind without a registered adapter is `NotImplemented`.
    fn resolve_adapter(&self, model: &str) -> Result<&dyn ProviderAdapter, GatewayError> {
        let kind = self.config.route(model).ok_or_else(|| {
            GatewayError::ModelNotAvailable(format!("Cannot infer provider for model '{}'", model))
        })?;
        self.adapter_for(kind)
            .ok_or_else(|| GatewayError::NotImplemented(kind.to_string()))
    }

    fn adapter_for(&self, kind: ProviderKind) -> Option<&dyn ProviderAdapter> {
        self.adapters
            .iter()
            .find(|a| a.kind() == kind)
            .map(|a| a.as_ref())
    }
}

#[async_trait]
impl ProviderClient for RoutingProviderClient {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        params: &GenerationParams,
    ) -> Result<String, GatewayError> {
        let adapter = self.resolve_adapter(model)?;
        debug!("Routing {} to {}", model, adapter.kind());
        with_retry(&self.retry, model, || adapter.generate(prompt, model, params)).await
    }
}
