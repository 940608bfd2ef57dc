//! Model value object representing an LLM model

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Supported LLM models (Value Object)
///
/// This is a closed allow-list: identifiers that are not listed here are
/// rejected with [`DomainError::UnsupportedModel`] instead of being routed
/// to some default backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    Gpt35Turbo,
    Gpt35Turbo16k,
    Gpt4,
    Gpt4Turbo,
    Gpt4o,
    Gpt4oMini,
}

impl Model {
    /// Every model on the allow-list.
    pub const ALL: [Model; 6] = [
        Model::Gpt35Turbo,
        Model::Gpt35Turbo16k,
        Model::Gpt4,
        Model::Gpt4Turbo,
        Model::Gpt4o,
        Model::Gpt4oMini,
    ];

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Gpt35Turbo16k => "gpt-3.5-turbo-16k",
            Model::Gpt4 => "gpt-4",
            Model::Gpt4Turbo => "gpt-4-turbo",
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4oMini => "gpt-4o-mini",
        }
    }

    /// Identifiers of all supported models, sorted
    pub fn supported_identifiers() -> Vec<&'static str> {
        let mut ids: Vec<_> = Self::ALL.iter().map(Model::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for Model {
    /// Returns the default model (gpt-4o-mini)
    fn default() -> Self {
        Model::Gpt4oMini
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| DomainError::UnsupportedModel(s.to_string()))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Generation settings for a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub model: Model,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ModelConfig {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}
