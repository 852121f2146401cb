//! Provider client port
//!
//! Defines the interface for sending one persona prompt to one model.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during provider calls
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Provider not implemented: {0}")]
    NotImplemented(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Only rate limiting is worth waiting out
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::RateLimited(_))
    }
}

/// Settings sent with every generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub system_prompt: String,
}

/// Client for LLM text generation
///
/// This port defines how the application layer talks to model providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Send `prompt` to `model` and return the raw reply text.
    ///
    /// `Ok("")` is a valid reply (the model said nothing). Any `Err` is
    /// recorded by the caller as a non-response.
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        params: &GenerationParams,
    ) -> Result<String, GatewayError>;
}
