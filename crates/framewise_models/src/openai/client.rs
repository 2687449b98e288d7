//! OpenAI chat completions vision client.

use super::conversion::{classify_status, error_message, extract_text, to_chat_request};
use super::dto::ChatResponse;
use crate::LlmMetrics;
use async_trait::async_trait;
use framewise_core::InferenceRequest;
use framewise_error::{ConfigError, ProviderError, ProviderErrorKind, ProviderResult};
use framewise_interface::VisionDriver;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, instrument};

/// Default OpenAI chat completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Vision client for OpenAI-compatible chat completions APIs.
///
/// Makes exactly one HTTP call per [`VisionDriver::describe`]; retrying is
/// left to the caller.
#[derive(Clone)]
pub struct OpenAIVisionClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl std::fmt::Debug for OpenAIVisionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIVisionClient")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl OpenAIVisionClient {
    /// Creates a client using the key in `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or empty.
    #[instrument(skip_all)]
    pub fn new(model: impl Into<String>) -> Result<Self, ConfigError> {
        Self::from_env("OPENAI_API_KEY", model)
    }

    /// Creates a client using the key in the environment variable `var`.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or empty.
    #[instrument(skip(model))]
    pub fn from_env(var: &str, model: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = std::env::var(var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::new(format!("{} not set", var)))?;
        Ok(Self::with_api_key(api_key, model))
    }

    /// Creates a client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Points the client at another OpenAI-compatible endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The endpoint requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &InferenceRequest) -> ProviderResult<String> {
        let body = to_chat_request(request, &self.model)
            .map_err(|e| ProviderError::new(ProviderErrorKind::MalformedRequest(e.to_string())))?;

        debug!(
            endpoint = %self.endpoint,
            image_bytes = request.image().len(),
            has_system_prompt = request.system_prompt().is_some(),
            "Sending chat completions request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Transport(format!(
                    "Request failed: {}",
                    e
                )))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::new(classify_status(
                status.as_u16(),
                error_message(&error_text),
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::Unknown {
                status: Some(status.as_u16()),
                message: format!("Failed to parse response: {}", e),
            })
        })?;

        if let Some(usage) = parsed.usage() {
            LlmMetrics::get().record_tokens(
                &self.model,
                *usage.prompt_tokens(),
                *usage.completion_tokens(),
                *usage.total_tokens(),
            );
        }

        extract_text(&parsed).map_err(ProviderError::new)
    }
}

#[async_trait]
impl VisionDriver for OpenAIVisionClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn describe(&self, request: &InferenceRequest) -> ProviderResult<String> {
        let started = Instant::now();
        let result = self.send(request).await;
        let metrics = LlmMetrics::get();
        match &result {
            Ok(text) => {
                metrics.record_request(
                    self.provider_name(),
                    &self.model,
                    started.elapsed().as_secs_f64(),
                );
                debug!(chars = text.len(), "Received narration");
            }
            Err(e) => {
                metrics.record_error(self.provider_name(), &self.model, e.kind());
                debug!(error = %e, "Provider call failed");
            }
        }
        result
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
