//! Processing parameters: answer pipeline control.
//!
//! [`ProcessingParams`] groups the static parameters that control how
//! [`AnswerProcessor`](crate::use_cases::process_question::AnswerProcessor)
//! builds prompts and calls the generation gateway.

use answerer_domain::{DEFAULT_EXCERPT_CHARS, Model, ModelConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingParams {
    /// Upper bound for one generation call.
    pub generation_timeout: Duration,
    /// Maximum characters of objective content used as question text.
    pub content_excerpt_chars: usize,
    /// Sampling temperature passed to the provider.
    pub temperature: f32,
    /// Maximum tokens per generated answer.
    pub max_tokens: u32,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            generation_timeout: Duration::from_secs(300),
            content_excerpt_chars: DEFAULT_EXCERPT_CHARS,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

impl ProcessingParams {
    // ==================== Builder Methods ====================

    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    pub fn with_content_excerpt_chars(mut self, chars: usize) -> Self {
        self.content_excerpt_chars = chars;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Generation settings for one request against `model`.
    pub fn model_config(&self, model: Model) -> ModelConfig {
        ModelConfig::new(model)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}
