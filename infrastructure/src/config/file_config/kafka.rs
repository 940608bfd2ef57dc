//! Kafka connection configuration from TOML (`[kafka]` section)

use super::validation::{ConfigIssue, Severity};
use serde::{Deserialize, Serialize};

const OFFSET_RESETS: [&str; 3] = ["latest", "earliest", "none"];

/// Raw Kafka configuration from TOML
///
/// # Example
///
/// ```toml
/// [kafka]
/// bootstrap_servers = "broker-1:9092,broker-2:9092"
/// input_topic = "question-events"
/// output_topic = "answer-events"
/// consumer_group = "llm-service-group"
/// auto_offset_reset = "latest"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileKafkaConfig {
    /// Comma-separated broker list
    pub bootstrap_servers: String,
    /// Topic carrying question events
    pub input_topic: String,
    /// Topic answer events are published to
    pub output_topic: String,
    /// Consumer group joined by the consumer
    pub consumer_group: String,
    /// Where a new consumer group starts reading
    pub auto_offset_reset: String,
    /// Offset auto-commit interval
    pub auto_commit_interval_ms: u64,
    /// Producer delivery timeout
    pub request_timeout_ms: u64,
    /// Wait between producer retries
    pub retry_backoff_ms: u64,
}

impl Default for FileKafkaConfig {
    fn default() -> Self {
        Self {
            bootstrap_servers: "localhost:9092".to_string(),
            input_topic: "question-events".to_string(),
            output_topic: "answer-events".to_string(),
            consumer_group: "llm-service-group".to_string(),
            auto_offset_reset: "latest".to_string(),
            auto_commit_interval_ms: 1000,
            request_timeout_ms: 30000,
            retry_backoff_ms: 1000,
        }
    }
}

impl FileKafkaConfig {
    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("kafka.bootstrap_servers", &self.bootstrap_servers),
            ("kafka.input_topic", &self.input_topic),
            ("kafka.output_topic", &self.output_topic),
            ("kafka.consumer_group", &self.consumer_group),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::empty(field));
            }
        }

        if self.request_timeout_ms == 0 {
            issues.push(ConfigIssue::zero("kafka.request_timeout_ms"));
        }

        if !OFFSET_RESETS.contains(&self.auto_offset_reset.as_str()) {
            issues.push(ConfigIssue::invalid_enum(
                Severity::Error,
                "kafka.auto_offset_reset",
                &self.auto_offset_reset,
                &OFFSET_RESETS,
                None,
            ));
        }

        issues
    }
}
