//! OpenAI chat-completions adapter
//!
//! Also serves OpenAI-compatible servers (vLLM, Ollama, proxies) through a
//! custom base URL.

use super::ProviderAdapter;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use survey_application::ports::provider_client::{GatewayError, GenerationParams};
use survey_domain::{ProviderEndpoint, ProviderKind};
use tracing::debug;

/// Official endpoint, used when no base URL is configured
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct OpenAiAdapter {
    kind: ProviderKind,
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiAdapter {
    pub fn new(kind: ProviderKind, endpoint: &ProviderEndpoint) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            kind,
            api_key: endpoint.usable_api_key().map(str::to_string),
            base_url: endpoint
                .base_url
                .clone()
                .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
            client,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        params: &GenerationParams,
    ) -> Result<String, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GatewayError::AuthenticationFailed(format!("API key not configured for {}", self.kind))
        })?;

        let body = build_request_body(prompt, model, params);
        debug!("POST {} model={}", self.completions_url(), model);

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(map_transport_error)?;

        if !(200..300).contains(&status) {
            return Err(parse_http_error(status, &body_text, self.kind));
        }

        parse_completion(&body_text)
    }
}

fn build_request_body(prompt: &str, model: &str, params: &GenerationParams) -> serde_json::Value {
    let mut messages = Vec::with_capacity(2);
    if !params.system_prompt.is_empty() {
        messages.push(serde_json::json!({
            "role": "system",
            "content": params.system_prompt,
        }));
    }
    messages.push(serde_json::json!({
        "role": "user",
        "content": prompt,
    }));

    serde_json::json!({
        "model": model,
        "messages": messages,
        "temperature": params.temperature,
        "max_tokens": params.max_tokens,
    })
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Trimmed content of the first choice; a `null` content is an empty reply
fn parse_completion(body: &str) -> Result<String, GatewayError> {
    let completion: ChatCompletion = serde_json::from_str(body)
        .map_err(|e| GatewayError::RequestFailed(format!("Failed to parse response: {}", e)))?;

    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::RequestFailed("Response has no choices".to_string()))?;

    Ok(choice
        .message
        .content
        .map(|c| c.trim().to_string())
        .unwrap_or_default())
}

/// Map a non-success HTTP status to a gateway error
fn parse_http_error(status: u16, body: &str, kind: ProviderKind) -> GatewayError {
    match status {
        401 => GatewayError::AuthenticationFailed(format!("{}: Invalid API key", kind)),
        403 => GatewayError::AuthenticationFailed(format!("{}: Access denied", kind)),
        404 => GatewayError::ModelNotAvailable(body.to_string()),
        429 => GatewayError::RateLimited(body.to_string()),
        _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status, body)),
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}
