//! Domain error types

use super::model::Model;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(
        "Unsupported model: {0}. Supported models: {supported}",
        supported = Model::supported_identifiers().join(", ")
    )]
    UnsupportedModel(String),

    #[error("Unknown objective type: {0}")]
    UnknownObjectiveType(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainError::UnsupportedModel("chat_gpt5".to_string());
        assert_eq!(
            error.to_string(),
            "Unsupported model: chat_gpt5. Supported models: gpt-3.5-turbo, \
             gpt-3.5-turbo-16k, gpt-4, gpt-4-turbo, gpt-4o, gpt-4o-mini"
        );

        let error = DomainError::UnknownObjectiveType("top_10".to_string());
        assert_eq!(error.to_string(), "Unknown objective type: top_10");
    }
}
