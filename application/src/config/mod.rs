//! Application-level configuration.
//!
//! - [`ProcessingParams`]: prompt excerpt bound, generation timeout and sampling
//! - [`ConsumerParams`]: inbound topic, consumer group and restart policy

pub mod consumer_params;
pub mod processing_params;

pub use consumer_params::ConsumerParams;
pub use processing_params::ProcessingParams;
