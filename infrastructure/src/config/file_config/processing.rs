//! Answer pipeline settings from TOML (`[processing]` section)

use super::openai::FileOpenAiConfig;
use super::validation::ConfigIssue;
use answerer_application::ProcessingParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessingConfig {
    /// Upper bound for one generation call
    pub generation_timeout_secs: u64,
    /// Characters of objective content used as question text
    pub content_excerpt_chars: usize,
}

impl Default for FileProcessingConfig {
    fn default() -> Self {
        Self {
            generation_timeout_secs: 300,
            content_excerpt_chars: 200,
        }
    }
}

impl FileProcessingConfig {
    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.generation_timeout_secs == 0 {
            issues.push(ConfigIssue::zero("processing.generation_timeout_secs"));
        }
        if self.content_excerpt_chars == 0 {
            issues.push(ConfigIssue::zero("processing.content_excerpt_chars"));
        }
        issues
    }

    /// Processing parameters, taking sampling settings from `openai`.
    pub fn to_params(&self, openai: &FileOpenAiConfig) -> ProcessingParams {
        ProcessingParams::default()
            .with_generation_timeout(Duration::from_secs(self.generation_timeout_secs))
            .with_content_excerpt_chars(self.content_excerpt_chars)
            .with_temperature(openai.temperature)
            .with_max_tokens(openai.max_tokens)
    }
}
