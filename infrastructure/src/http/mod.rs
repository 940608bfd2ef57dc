//! Health and metrics HTTP server
//!
//! Runs beside the consumer and exposes:
//!
//! - `GET /health`: liveness
//! - `GET /metrics`: consumer and processor counters

mod routes;

pub use routes::{HealthResponse, MetricsResponse, SERVICE_NAME, router};

use answerer_domain::{ConsumerStats, ProcessingStats};
use std::future::Future;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub consumer_stats: watch::Receiver<ConsumerStats>,
    pub processing_stats: watch::Receiver<ProcessingStats>,
}

impl AppState {
    pub fn new(
        consumer_stats: watch::Receiver<ConsumerStats>,
        processing_stats: watch::Receiver<ProcessingStats>,
    ) -> Self {
        Self {
            consumer_stats,
            processing_stats,
        }
    }
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    info!(addr = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
