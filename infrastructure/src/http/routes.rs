//! Route handlers

use super::AppState;
use answerer_domain::{ConsumerStats, ProcessingStats};
use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};

pub const SERVICE_NAME: &str = "objective-answerer";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub consumer: ConsumerStats,
    pub processor: ProcessingStats,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        consumer: state.consumer_stats.borrow().clone(),
        processor: state.processing_stats.borrow().clone(),
    })
}
