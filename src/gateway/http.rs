//! HTTP gateway client.

use super::types::{CompletionRequest, CompletionResponse, ModelList};
use super::{Gateway, GatewayError};
use crate::config::{ConfigError, GatewayConfig};
use crate::logging::extract_tokens;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Talks to a gateway over its OpenAI-compatible HTTP surface:
/// - Chat completion via POST /v1/chat/completions
/// - Model listing via GET /v1/models
pub struct HttpGateway {
    /// Base URL without `/v1` (e.g., "http://localhost:8000")
    base_url: String,
    /// Optional bearer token
    api_key: Option<String>,
    /// Per-call deadline
    timeout: Duration,
    client: Client,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            timeout,
            client: Client::new(),
        }
    }

    /// Build from configuration, resolving the API key from the environment.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.normalized_base_url(),
            config.resolve_api_key()?,
            Duration::from_secs(config.timeout_seconds),
        ))
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("authorization", format!("Bearer {}", key)),
            None => builder,
        }
    }

    async fn read_success_body(&self, response: reqwest::Response) -> Result<String, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(GatewayError::upstream(status.as_u16(), &error_body));
        }

        response.text().await.map_err(|e| {
            GatewayError::InvalidResponse(format!("Failed to read response body: {}", e))
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GatewayError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .authorize(self.client.post(&url))
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| GatewayError::from_reqwest(e, self.timeout_ms()))?;

        let body = self.read_success_body(response).await?;

        let completion: CompletionResponse = serde_json::from_str(&body).map_err(|e| {
            GatewayError::InvalidResponse(format!("Failed to parse completion response: {}", e))
        })?;

        let (prompt_tokens, completion_tokens, total_tokens) = extract_tokens(&completion);
        tracing::debug!(
            model = %request.model,
            choices = completion.choices.len(),
            prompt_tokens,
            completion_tokens,
            total_tokens,
            "Gateway completion received"
        );

        Ok(completion)
    }

    async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        let url = format!("{}/v1/models", self.base_url);

        let response = self
            .authorize(self.client.get(&url))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| GatewayError::from_reqwest(e, self.timeout_ms()))?;

        let body = self.read_success_body(response).await?;

        let models: ModelList = serde_json::from_str(&body).map_err(|e| {
            GatewayError::InvalidResponse(format!("Failed to parse models response: {}", e))
        })?;

        Ok(models.into_ids())
    }
}
