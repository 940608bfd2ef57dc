//! Service assembly and lifecycle.
//!
//! Builds every adapter from the loaded [`FileConfig`], starts the producer,
//! consumer and HTTP server, then waits for a shutdown signal and tears
//! everything down in reverse order.

use answerer_application::ObjectiveRepository;
use answerer_infrastructure::config::FileStoreConfig;
use answerer_infrastructure::{FileConfig, JsonFileObjectiveRepository, StoreBackend};
use anyhow::{Context, Result, anyhow};
use std::sync::Arc;
use tracing::info;

/// Build the configured objective store and check that it answers.
pub async fn build_repository(store: &FileStoreConfig) -> Result<Arc<dyn ObjectiveRepository>> {
    let backend = store
        .parse_backend()
        .0
        .ok_or_else(|| anyhow!("unknown store backend '{}'", store.backend))?;

    let repository: Arc<dyn ObjectiveRepository> = match backend {
        StoreBackend::File => {
            let path = store
                .file_path
                .as_ref()
                .context("store.file_path is required for the file backend")?;
            Arc::new(JsonFileObjectiveRepository::load(path).await?)
        }
        StoreBackend::MongoDb => connect_mongo(store).await?,
    };

    repository
        .ping()
        .await
        .context("objective store is unreachable")?;
    info!(backend = %store.backend, "Objective store ready");
    Ok(repository)
}

#[cfg(feature = "mongodb")]
async fn connect_mongo(store: &FileStoreConfig) -> Result<Arc<dyn ObjectiveRepository>> {
    let repository = answerer_infrastructure::MongoObjectiveRepository::connect(
        &store.mongodb_url,
        &store.database,
        &store.collection,
    )
    .await?;
    Ok(Arc::new(repository))
}

#[cfg(not(feature = "mongodb"))]
async fn connect_mongo(_store: &FileStoreConfig) -> Result<Arc<dyn ObjectiveRepository>> {
    anyhow::bail!(
        "store.backend = \"mongodb\" requires the `mongodb` feature; \
         rebuild with `--features mongodb` or use the file backend"
    )
}

/// Copy of `config` that is safe to print.
pub fn redacted(config: &FileConfig) -> FileConfig {
    let mut config = config.clone();
    if config.openai.api_key.is_some() {
        config.openai.api_key = Some("<redacted>".to_string());
    }
    config
}

#[cfg(feature = "kafka")]
pub use service::run;

#[cfg(not(feature = "kafka"))]
pub async fn run(_config: FileConfig) -> Result<()> {
    anyhow::bail!(
        "objective-answerer was built without the `kafka` feature and cannot consume \
         question events; rebuild with `--features kafka`"
    )
}

#[cfg(feature = "kafka")]
mod service {
    use super::build_repository;
    use answerer_application::{AnswerProcessor, EventConsumer, EventProducer};
    use answerer_domain::{ConsumerState, PromptStrategyRegistry};
    use answerer_infrastructure::http::{self, AppState};
    use answerer_infrastructure::{
        FileConfig, KafkaMessageSink, KafkaMessageSource, OpenAiProviderAdapter, ProviderAdapter,
        RoutingGateway,
    };
    use anyhow::{Context, Result};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;
    use tracing::{error, info, warn};

    /// Run the service until Ctrl-C / SIGTERM or until the consumer gives up.
    pub async fn run(config: FileConfig) -> Result<()> {
        // === Dependency Injection ===
        let repository = build_repository(&config.store).await?;

        let openai: Arc<dyn ProviderAdapter> =
            Arc::new(OpenAiProviderAdapter::from_config(&config.openai)?);
        let gateway = Arc::new(RoutingGateway::new(vec![openai]));

        let sink = Arc::new(KafkaMessageSink::new(config.kafka.clone()));
        let producer = Arc::new(EventProducer::new(sink, &config.kafka.output_topic));
        producer.start().await.context("failed to start event producer")?;

        let strategies = PromptStrategyRegistry::default();
        info!(
            objective_types = ?strategies.objective_types(),
            "Prompt strategies registered"
        );
        let processor = Arc::new(
            AnswerProcessor::new(repository, gateway, producer.clone())
                .with_strategies(strategies)
                .with_params(config.processing.to_params(&config.openai)),
        );

        let source = Arc::new(KafkaMessageSource::new(config.kafka.clone()));
        let consumer = EventConsumer::new(
            source,
            processor.clone(),
            config.consumer.to_params(&config.kafka),
        );
        consumer.start().await.context("failed to start event consumer")?;

        let shutdown = CancellationToken::new();
        let server = if config.http.enabled {
            let addr = config.http.bind_addr().context("invalid http.bind address")?;
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("failed to bind HTTP server to {}", addr))?;
            let state = AppState::new(consumer.subscribe_stats(), processor.subscribe_stats());
            let token = shutdown.clone();
            Some(tokio::spawn(http::serve(listener, state, async move {
                token.cancelled().await
            })))
        } else {
            None
        };

        info!(
            input_topic = %config.kafka.input_topic,
            output_topic = %config.kafka.output_topic,
            "objective-answerer running"
        );

        let mut consumer_state = consumer.subscribe_stats();
        tokio::select! {
            _ = shutdown_signal() => info!("Shutdown signal received"),
            _ = consumer_state.wait_for(|stats| stats.state == ConsumerState::Stopped) => {
                error!("Event consumer stopped on its own, shutting down");
            }
        }

        // === Teardown ===
        if let Err(e) = consumer.stop().await {
            warn!(error = %e, "Error stopping event consumer");
        }
        if let Err(e) = producer.close().await {
            warn!(error = %e, "Error stopping event producer");
        }
        shutdown.cancel();
        if let Some(server) = server {
            match server.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(error = %e, "HTTP server error"),
                Err(e) => warn!(error = %e, "HTTP server task failed"),
            }
        }

        let stats = processor.stats();
        info!(
            questions_processed = stats.questions_processed,
            questions_failed = stats.questions_failed,
            "objective-answerer stopped"
        );
        Ok(())
    }

    async fn shutdown_signal() {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    error!(error = %e, "Failed to listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {}
            _ = terminate => {}
        }
    }
}
