//! Prompt domain
//!
//! Strategies that turn an objective plus question context into a single
//! natural-language instruction, and the registry that picks one by
//! objective type.

mod registry;
mod strategy;

pub use registry::PromptStrategyRegistry;
pub use strategy::{PromptRequest, PromptStrategy};
