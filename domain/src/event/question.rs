//! Inbound question event.

use super::persona::{self, Persona};
use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize};

/// Language assumed when the event carries none.
pub const DEFAULT_LANGUAGE: &str = "EN";

/// A request to answer one question of an objective execution.
///
/// `(execution_id, question_id)` identifies the request; the matching
/// [`AnswerEvent`](super::answer::AnswerEvent) carries the same pair back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionEvent {
    pub manifest_id: String,
    pub execution_id: String,
    pub objective_id: String,
    pub question_id: String,
    #[serde(default, deserialize_with = "persona::deserialize_nullable")]
    pub persona: Persona,
    #[serde(default = "default_language", deserialize_with = "deserialize_language")]
    pub language: String,
    pub model: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn deserialize_language<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let language = Option::<String>::deserialize(deserializer)?;
    Ok(match language {
        Some(l) if !l.trim().is_empty() => l.trim().to_string(),
        _ => default_language(),
    })
}

impl QuestionEvent {
    /// Decode and validate a raw bus payload.
    pub fn from_slice(payload: &[u8]) -> Result<Self, DomainError> {
        let event: QuestionEvent = serde_json::from_slice(payload)
            .map_err(|e| DomainError::InvalidEvent(e.to_string()))?;
        event.validate()?;
        Ok(event)
    }

    /// Check the schema constraints serde cannot express.
    pub fn validate(&self) -> Result<(), DomainError> {
        let required = [
            ("manifest_id", &self.manifest_id),
            ("execution_id", &self.execution_id),
            ("objective_id", &self.objective_id),
            ("question_id", &self.question_id),
            ("model", &self.model),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(DomainError::InvalidEvent(format!("{} must not be empty", field)));
        }
        self.persona.validate()
    }
}
