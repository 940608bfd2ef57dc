//! Domain layer for objective-answerer
//!
//! This crate contains the core business types and rules. It has no
//! dependencies on infrastructure or runtime concerns.
//!
//! # Core Concepts
//!
//! - **Question / Answer events**: the inbound request and its correlated
//!   outbound result. Every question yields exactly one answer, either
//!   `completed` or `failed`.
//! - **Objective**: the stored task definition whose `type` selects a
//!   prompt strategy.
//! - **Prompt strategies**: a closed set of prompt builders resolved by
//!   objective type through [`PromptStrategyRegistry`].
//! - **Model**: the closed allow-list of generation models.

pub mod core;
pub mod event;
pub mod objective;
pub mod prompt;
pub mod stats;

// Re-export commonly used types
pub use core::{
    error::DomainError,
    model::{Model, ModelConfig},
};
pub use event::{AnswerEvent, AnswerStatus, DEFAULT_LANGUAGE, Persona, QuestionEvent};
pub use objective::{DEFAULT_EXCERPT_CHARS, ObjectiveDocument};
pub use prompt::{PromptRequest, PromptStrategy, PromptStrategyRegistry};
pub use stats::{ConsumerState, ConsumerStats, ProcessingStats};
