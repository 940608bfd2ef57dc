//! Infrastructure layer for objective-answerer
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod bus;
pub mod config;
pub mod http;
pub mod providers;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigIssue, ConfigLoader, FileConfig, LogFormat, Severity, StoreBackend,
};
pub use http::AppState;
pub use providers::{OpenAiProviderAdapter, ProviderAdapter, ProviderKind, RoutingGateway};
pub use store::JsonFileObjectiveRepository;

#[cfg(feature = "kafka")]
pub use bus::{KafkaMessageSink, KafkaMessageSource};
#[cfg(feature = "mongodb")]
pub use store::MongoObjectiveRepository;
