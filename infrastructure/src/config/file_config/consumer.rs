//! Consumer restart policy from TOML (`[consumer]` section)

use super::kafka::FileKafkaConfig;
use super::validation::ConfigIssue;
use answerer_application::ConsumerParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw consumer configuration from TOML
///
/// # Example
///
/// ```toml
/// [consumer]
/// restart_backoff_secs = 5
/// max_restarts = 20          # omit to retry forever
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsumerConfig {
    /// Fixed wait before restarting a failed consumption loop
    pub restart_backoff_secs: u64,
    /// Restart cap; unset means unbounded
    pub max_restarts: Option<u32>,
}

impl Default for FileConsumerConfig {
    fn default() -> Self {
        Self {
            restart_backoff_secs: 5,
            max_restarts: None,
        }
    }
}

impl FileConsumerConfig {
    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.restart_backoff_secs == 0 {
            issues.push(ConfigIssue::zero("consumer.restart_backoff_secs"));
        }
        issues
    }

    /// Consumer parameters for the inbound topic described by `kafka`.
    pub fn to_params(&self, kafka: &FileKafkaConfig) -> ConsumerParams {
        ConsumerParams::new(&kafka.input_topic, &kafka.consumer_group)
            .with_restart_backoff(Duration::from_secs(self.restart_backoff_secs))
            .with_max_restarts(self.max_restarts)
    }
}
