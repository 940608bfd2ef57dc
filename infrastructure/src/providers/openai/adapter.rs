//! OpenAI provider adapter
//!
//! Implements `ProviderAdapter` to plug into the `RoutingGateway`.

use super::types::{ChatRequest, ChatResponse};
use crate::config::FileOpenAiConfig;
use crate::providers::{ProviderAdapter, ProviderKind};
use answerer_application::ports::llm_gateway::GatewayError;
use answerer_domain::core::string::excerpt;
use answerer_domain::{Model, ModelConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const ERROR_BODY_CHARS: usize = 300;

pub struct OpenAiProviderAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiProviderAdapter {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Build from the `[openai]` section, resolving the key from the environment.
    ///
    /// A missing key is not an error here: requests fail with
    /// [`GatewayError::NotConfigured`] until one is provided.
    pub fn from_config(config: &FileOpenAiConfig) -> Result<Self, GatewayError> {
        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            warn!(
                api_key_env = %config.api_key_env,
                "OpenAI API key not set, generation requests will fail"
            );
        }
        Self::new(&config.base_url, api_key)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProviderAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn supports_model(&self, model: &Model) -> bool {
        ProviderKind::for_model(model) == ProviderKind::OpenAi
    }

    async fn generate(&self, prompt: &str, config: &ModelConfig) -> Result<String, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GatewayError::NotConfigured("OpenAI API key is not set".to_string())
        })?;

        debug!(model = %config.model, prompt_len = prompt.len(), "Sending chat completion request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&ChatRequest::user(prompt, config))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else if e.is_connect() {
                    GatewayError::ConnectionError(e.to_string())
                } else {
                    GatewayError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {} from OpenAI: {}",
                status,
                excerpt(&body, ERROR_BODY_CHARS)
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        completion.into_text()
    }
}
