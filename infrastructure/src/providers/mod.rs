//! Generation providers
//!
//! Each [`ProviderAdapter`] talks to one backend. The [`RoutingGateway`]
//! implements the application's `LlmGateway` port by picking the adapter
//! whose [`ProviderKind`] serves the requested model.

pub mod openai;
pub mod routing;

pub use openai::OpenAiProviderAdapter;
pub use routing::RoutingGateway;

use answerer_application::ports::llm_gateway::GatewayError;
use answerer_domain::{Model, ModelConfig};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderKind {
    #[default]
    OpenAi,
}

impl ProviderKind {
    /// The backend that serves `model`.
    pub fn for_model(model: &Model) -> Self {
        match model {
            Model::Gpt35Turbo
            | Model::Gpt35Turbo16k
            | Model::Gpt4
            | Model::Gpt4Turbo
            | Model::Gpt4o
            | Model::Gpt4oMini => ProviderKind::OpenAi,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;
    fn supports_model(&self, model: &Model) -> bool;
    /// Run one single-turn completion.
    async fn generate(&self, prompt: &str, config: &ModelConfig) -> Result<String, GatewayError>;
}
