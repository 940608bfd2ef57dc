//! Consumer parameters: subscription and restart policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerParams {
    /// Inbound topic carrying question events.
    pub topic: String,
    /// Consumer group joined on subscribe.
    pub consumer_group: String,
    /// Fixed wait before restarting a failed consumption loop.
    pub restart_backoff: Duration,
    /// Give up after this many restarts. `None` retries forever.
    pub max_restarts: Option<u32>,
}

impl Default for ConsumerParams {
    fn default() -> Self {
        Self {
            topic: "question-events".to_string(),
            consumer_group: "llm-service-group".to_string(),
            restart_backoff: Duration::from_secs(5),
            max_restarts: None,
        }
    }
}

impl ConsumerParams {
    pub fn new(topic: impl Into<String>, consumer_group: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            consumer_group: consumer_group.into(),
            ..Default::default()
        }
    }

    pub fn with_restart_backoff(mut self, backoff: Duration) -> Self {
        self.restart_backoff = backoff;
        self
    }

    pub fn with_max_restarts(mut self, max: Option<u32>) -> Self {
        self.max_restarts = max;
        self
    }
}
