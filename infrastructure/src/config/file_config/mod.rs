//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application parameters
//! with the `to_params` helpers.

mod consumer;
mod http;
mod kafka;
mod logging;
mod openai;
mod processing;
mod store;
mod validation;

pub use consumer::FileConsumerConfig;
pub use http::FileHttpConfig;
pub use kafka::FileKafkaConfig;
pub use logging::{FileLoggingConfig, LogFormat};
pub use openai::FileOpenAiConfig;
pub use processing::FileProcessingConfig;
pub use store::{FileStoreConfig, StoreBackend};
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Broker connection and topics
    pub kafka: FileKafkaConfig,
    /// Consumption-loop restart policy
    pub consumer: FileConsumerConfig,
    /// Objective document store
    pub store: FileStoreConfig,
    /// Generation provider
    pub openai: FileOpenAiConfig,
    /// Answer pipeline
    pub processing: FileProcessingConfig,
    /// Health/metrics server
    pub http: FileHttpConfig,
    /// Log level and format
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Issues with [`Severity::Error`] must abort startup; warnings are
    /// logged and the affected field falls back to its default.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.kafka.validate());
        issues.extend(self.consumer.validate());
        issues.extend(self.store.validate());
        issues.extend(self.openai.validate());
        issues.extend(self.processing.validate());
        issues.extend(self.http.validate());
        issues.extend(self.logging.parse_format().1);

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[kafka]
bootstrap_servers = "kafka-1:9092,kafka-2:9092"
input_topic = "questions"
output_topic = "answers"
consumer_group = "answerers"

[consumer]
restart_backoff_secs = 10
max_restarts = 3

[store]
backend = "file"
file_path = "/srv/objectives.json"

[openai]
api_key_env = "MY_OPENAI_KEY"
temperature = 0.2
max_tokens = 512

[processing]
generation_timeout_secs = 60

[http]
enabled = false

[logging]
level = "debug"
format = "json"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.kafka.bootstrap_servers, "kafka-1:9092,kafka-2:9092");
        assert_eq!(config.kafka.input_topic, "questions");
        assert_eq!(config.consumer.max_restarts, Some(3));
        assert_eq!(config.store.parse_backend().0, Some(StoreBackend::File));
        assert_eq!(config.openai.api_key_env, "MY_OPENAI_KEY");
        assert!(!config.http.enabled);
        assert_eq!(config.logging.parse_format().0, LogFormat::Json);
        assert!(config.validate().is_empty());

        let consumer = config.consumer.to_params(&config.kafka);
        assert_eq!(consumer.topic, "questions");
        assert_eq!(consumer.consumer_group, "answerers");
        assert_eq!(consumer.restart_backoff, Duration::from_secs(10));

        let processing = config.processing.to_params(&config.openai);
        assert_eq!(processing.generation_timeout, Duration::from_secs(60));
        assert_eq!(processing.content_excerpt_chars, 200);
        assert_eq!(processing.temperature, 0.2);
        assert_eq!(processing.max_tokens, 512);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[kafka]
bootstrap_servers = "kafka:29092"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.kafka.bootstrap_servers, "kafka:29092");
        // Defaults should apply
        assert_eq!(config.kafka.input_topic, "question-events");
        assert_eq!(config.kafka.output_topic, "answer-events");
        assert_eq!(config.store.database, "llm_business");
        assert_eq!(config.http.bind, "0.0.0.0:8000");
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.kafka.consumer_group, "llm-service-group");
        assert_eq!(config.kafka.auto_offset_reset, "latest");
        assert_eq!(config.consumer.restart_backoff_secs, 5);
        assert!(config.consumer.max_restarts.is_none());
        assert_eq!(config.store.collection, "objectives");
        assert_eq!(config.processing.generation_timeout_secs, 300);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_errors() {
        let mut config = FileConfig::default();
        config.kafka.input_topic = " ".to_string();
        config.processing.generation_timeout_secs = 0;
        config.store.backend = "redis".to_string();

        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(ConfigIssue::is_error));
        assert!(issues[0].message.starts_with("kafka.input_topic"));
    }

    #[test]
    fn test_unknown_log_format_is_a_warning() {
        let mut config = FileConfig::default();
        config.logging.format = "xml".to_string();

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(config.logging.parse_format().0, LogFormat::Pretty);
    }

    #[test]
    fn test_unparseable_bind_address() {
        let mut config = FileConfig::default();
        config.http.bind = "localhost".to_string();
        assert_eq!(config.validate().len(), 1);

        config.http.enabled = false;
        assert!(config.validate().is_empty());
    }
}
