//! Event producer.
//!
//! Encodes [`AnswerEvent`]s as JSON and sends them through a
//! [`MessageSink`], keyed by execution id so that every answer of one
//! execution lands on the same partition.

use crate::ports::answer_publisher::{AnswerPublisher, PublishError};
use crate::ports::message_bus::MessageSink;
use answerer_domain::AnswerEvent;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

pub struct EventProducer {
    sink: Arc<dyn MessageSink>,
    topic: String,
    started: AtomicBool,
}

impl EventProducer {
    pub fn new(sink: Arc<dyn MessageSink>, topic: impl Into<String>) -> Self {
        Self {
            sink,
            topic: topic.into(),
            started: AtomicBool::new(false),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Open the outbound channel.
    pub async fn start(&self) -> Result<(), PublishError> {
        if let Err(e) = self.sink.connect().await {
            error!(error = %e, "Failed to start event producer");
            return Err(e.into());
        }
        self.started.store(true, Ordering::Release);
        info!(output_topic = %self.topic, "Event producer started");
        Ok(())
    }

    /// Flush and release the outbound channel. Closing twice is a no-op.
    pub async fn close(&self) -> Result<(), PublishError> {
        if !self.started.swap(false, Ordering::AcqRel) {
            return Ok(());
        }
        match self.sink.close().await {
            Ok(()) => {
                info!("Event producer stopped");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Error stopping event producer");
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl AnswerPublisher for EventProducer {
    async fn publish_answer(&self, event: &AnswerEvent) -> Result<(), PublishError> {
        if !self.is_started() {
            error!(
                execution_id = %event.execution_id,
                question_id = %event.question_id,
                "Cannot publish answer event: producer not started"
            );
            return Err(PublishError::NotStarted);
        }

        let payload = serde_json::to_vec(event)?;

        match self
            .sink
            .send(&self.topic, event.partition_key(), &payload)
            .await
        {
            Ok(receipt) => {
                info!(
                    execution_id = %event.execution_id,
                    question_id = %event.question_id,
                    success = event.is_completed(),
                    topic = %self.topic,
                    partition = receipt.partition,
                    offset = receipt.offset,
                    "Answer event published"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    error = %e,
                    execution_id = %event.execution_id,
                    question_id = %event.question_id,
                    "Failed to publish answer event"
                );
                Err(e.into())
            }
        }
    }
}
