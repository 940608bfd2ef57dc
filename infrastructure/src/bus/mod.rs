//! Message bus adapters
//!
//! Implementations of the application's `MessageSource` / `MessageSink`
//! ports. The Kafka connector is compiled with the `kafka` feature.

#[cfg(feature = "kafka")]
pub mod kafka;

#[cfg(feature = "kafka")]
pub use kafka::{KafkaMessageSink, KafkaMessageSource};
