//! Answer publisher port
//!
//! What the answer processor needs from the outbound side: hand over one
//! [`AnswerEvent`] and learn whether the broker accepted it.

use super::message_bus::BusError;
use answerer_domain::AnswerEvent;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while publishing an answer.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Producer not started")]
    NotStarted,

    #[error("Failed to encode answer event: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Delivery error: {0}")]
    Delivery(#[from] BusError),
}

#[async_trait]
pub trait AnswerPublisher: Send + Sync {
    /// Publish `event`, returning once the broker has acknowledged it.
    async fn publish_answer(&self, event: &AnswerEvent) -> Result<(), PublishError>;
}
