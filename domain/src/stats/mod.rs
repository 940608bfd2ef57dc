//! Process-local counters exposed through the metrics endpoint.
//!
//! Both types are plain values. Their owners keep them behind a
//! `tokio::sync::watch` channel so that only the owning loop mutates them
//! and readers always see a consistent snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Answer-processing counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingStats {
    pub questions_processed: u64,
    pub questions_failed: u64,
    pub total_processing_time_ms: u64,
    pub average_processing_time_ms: u64,
}

impl ProcessingStats {
    /// Account for one finished question.
    pub fn record(&mut self, processing_time_ms: u64, success: bool) {
        if success {
            self.questions_processed += 1;
        } else {
            self.questions_failed += 1;
        }
        self.total_processing_time_ms += processing_time_ms;
        self.average_processing_time_ms = self.total_processing_time_ms / self.total();
    }

    /// Questions seen, whatever their outcome.
    pub fn total(&self) -> u64 {
        self.questions_processed + self.questions_failed
    }
}

/// Lifecycle of the consumption loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsumerState {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// Consumption-loop counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerStats {
    pub state: ConsumerState,
    pub running: bool,
    pub topic: String,
    pub consumer_group: String,
    pub messages_processed: u64,
    pub messages_failed: u64,
    pub last_processed_at: Option<DateTime<Utc>>,
    pub restarts: u64,
}

impl ConsumerStats {
    pub fn new(topic: impl Into<String>, consumer_group: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            consumer_group: consumer_group.into(),
            ..Default::default()
        }
    }

    pub fn set_state(&mut self, state: ConsumerState) {
        self.state = state;
        self.running = state == ConsumerState::Running;
    }

    pub fn record_processed(&mut self, at: DateTime<Utc>) {
        self.messages_processed += 1;
        self.last_processed_at = Some(at);
    }

    pub fn record_failed(&mut self) {
        self.messages_failed += 1;
    }
}
