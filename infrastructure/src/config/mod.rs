//! Configuration file loading for objective-answerer
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ANSWERER_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./answerer.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/objective-answerer/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, ConfigIssueCode, FileConfig, FileConsumerConfig, FileHttpConfig,
    FileKafkaConfig, FileLoggingConfig, FileOpenAiConfig, FileProcessingConfig, FileStoreConfig,
    LogFormat, Severity, StoreBackend,
};
pub use loader::{ConfigError, ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
