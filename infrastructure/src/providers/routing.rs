use super::{ProviderAdapter, ProviderKind};
use answerer_application::ports::llm_gateway::{GatewayError, LlmGateway};
use answerer_domain::{Model, ModelConfig};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// [`LlmGateway`] that dispatches each request to the adapter serving its model.
///
/// Every model maps to exactly one [`ProviderKind`]. When no adapter of that
/// kind is registered the request fails with
/// [`GatewayError::ModelNotAvailable`]; there is no fallback provider.
pub struct RoutingGateway {
    providers: Vec<Arc<dyn ProviderAdapter>>,
}

impl RoutingGateway {
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        Self { providers }
    }

    pub fn kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    fn resolve_provider(&self, model: &Model) -> Result<&dyn ProviderAdapter, GatewayError> {
        let kind = ProviderKind::for_model(model);

        self.providers
            .iter()
            .find(|p| p.kind() == kind && p.supports_model(model))
            .map(|p| p.as_ref())
            .ok_or_else(|| {
                GatewayError::ModelNotAvailable(format!(
                    "No {} provider registered for model {}",
                    kind, model
                ))
            })
    }
}

#[async_trait]
impl LlmGateway for RoutingGateway {
    async fn generate(&self, prompt: &str, config: &ModelConfig) -> Result<String, GatewayError> {
        let provider = self.resolve_provider(&config.model)?;
        debug!(model = %config.model, provider = %provider.kind(), "Routing generation request");
        provider.generate(prompt, config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // -- Mock ProviderAdapter --------------------------------------------------

    struct MockProvider {
        kind: ProviderKind,
        supported: Vec<Model>,
        calls: Mutex<Vec<Model>>,
    }

    impl MockProvider {
        fn new(kind: ProviderKind, supported: Vec<Model>) -> Arc<Self> {
            Arc::new(Self {
                kind,
                supported,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ProviderAdapter for MockProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        fn supports_model(&self, model: &Model) -> bool {
            self.supported.contains(model)
        }

        async fn generate(
            &self,
            _prompt: &str,
            config: &ModelConfig,
        ) -> Result<String, GatewayError> {
            self.calls.lock().unwrap().push(config.model);
            Ok(format!("{} answered", config.model))
        }
    }

    // -- resolve_provider routing tests ----------------------------------------

    #[test]
    fn every_model_maps_to_a_provider_kind() {
        for model in Model::ALL {
            assert_eq!(ProviderKind::for_model(&model), ProviderKind::OpenAi);
        }
    }

    #[test]
    fn empty_providers_returns_model_not_available() {
        let gw = RoutingGateway::new(vec![]);

        let result = gw.resolve_provider(&Model::Gpt4o);
        assert!(matches!(result, Err(GatewayError::ModelNotAvailable(_))));
    }

    #[test]
    fn provider_that_rejects_the_model_is_skipped() {
        let provider: Arc<dyn ProviderAdapter> =
            MockProvider::new(ProviderKind::OpenAi, vec![Model::Gpt4]);
        let gw = RoutingGateway::new(vec![provider]);

        assert!(gw.resolve_provider(&Model::Gpt4).is_ok());
        assert!(matches!(
            gw.resolve_provider(&Model::Gpt4oMini),
            Err(GatewayError::ModelNotAvailable(_))
        ));
    }

    // -- LlmGateway trait integration tests ------------------------------------

    #[tokio::test]
    async fn generate_forwards_the_requested_model() {
        let provider = MockProvider::new(ProviderKind::OpenAi, Model::ALL.to_vec());
        let providers: Vec<Arc<dyn ProviderAdapter>> = vec![provider.clone()];
        let gw = RoutingGateway::new(providers);
        assert_eq!(gw.kinds(), vec![ProviderKind::OpenAi]);

        let text = gw
            .generate("prompt", &ModelConfig::new(Model::Gpt35Turbo16k))
            .await
            .unwrap();

        assert_eq!(text, "gpt-3.5-turbo-16k answered");
        assert_eq!(*provider.calls.lock().unwrap(), vec![Model::Gpt35Turbo16k]);
    }
}
