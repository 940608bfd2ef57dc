//! LLM Gateway port
//!
//! Defines the "generate text from prompt" capability the answer pipeline
//! depends on. Concrete providers live in the infrastructure layer.

use answerer_domain::ModelConfig;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to generation
/// providers. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Generate a completion for `prompt` using the model in `config`
    async fn generate(&self, prompt: &str, config: &ModelConfig) -> Result<String, GatewayError>;
}
