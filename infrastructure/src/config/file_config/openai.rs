//! OpenAI provider configuration from TOML (`[openai]` section)

use super::validation::ConfigIssue;
use serde::{Deserialize, Serialize};

/// OpenAI API provider configuration.
///
/// # Example
///
/// ```toml
/// [openai]
/// api_key_env = "OPENAI_API_KEY"
/// base_url = "https://api.openai.com"
/// temperature = 0.7
/// max_tokens = 2000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the API (can be overridden for compatible gateways).
    pub base_url: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Max tokens per answer.
    pub max_tokens: u32,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

impl FileOpenAiConfig {
    /// Resolve the API key: the direct value wins over the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.base_url.trim().is_empty() {
            issues.push(ConfigIssue::empty("openai.base_url"));
        }
        if self.max_tokens == 0 {
            issues.push(ConfigIssue::zero("openai.max_tokens"));
        }
        issues
    }
}
