//! Outbound answer event.

use super::persona::Persona;
use super::question::QuestionEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of processing one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerStatus {
    Completed,
    Failed,
}

impl AnswerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerStatus::Completed => "completed",
            AnswerStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for AnswerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The answer (or explicit failure marker) for one [`QuestionEvent`].
///
/// Built only through [`AnswerEvent::completed`] and [`AnswerEvent::failed`],
/// both of which copy every correlation field from the question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEvent {
    pub manifest_id: String,
    pub execution_id: String,
    pub objective_id: String,
    pub question_id: String,
    pub persona: Persona,
    pub language: String,
    pub model: String,
    pub answer: String,
    pub status: AnswerStatus,
    pub processed_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

impl AnswerEvent {
    fn from_question(
        question: &QuestionEvent,
        answer: String,
        status: AnswerStatus,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            manifest_id: question.manifest_id.clone(),
            execution_id: question.execution_id.clone(),
            objective_id: question.objective_id.clone(),
            question_id: question.question_id.clone(),
            persona: question.persona.clone(),
            language: question.language.clone(),
            model: question.model.clone(),
            answer,
            status,
            processed_at: Utc::now(),
            processing_time_ms,
        }
    }

    pub fn completed(
        question: &QuestionEvent,
        answer: impl Into<String>,
        processing_time_ms: u64,
    ) -> Self {
        Self::from_question(
            question,
            answer.into(),
            AnswerStatus::Completed,
            processing_time_ms,
        )
    }

    /// A failure marker: empty answer, all identifiers preserved.
    pub fn failed(question: &QuestionEvent, processing_time_ms: u64) -> Self {
        Self::from_question(question, String::new(), AnswerStatus::Failed, processing_time_ms)
    }

    pub fn is_completed(&self) -> bool {
        self.status == AnswerStatus::Completed
    }

    /// Partition key: all answers of one execution share a partition.
    pub fn partition_key(&self) -> &[u8] {
        self.execution_id.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> QuestionEvent {
        QuestionEvent {
            manifest_id: "m-1".to_string(),
            execution_id: "exec-1".to_string(),
            objective_id: "obj-1".to_string(),
            question_id: "q-1".to_string(),
            persona: Persona::new().with("role", "analyst"),
            language: "FR".to_string(),
            model: "gpt-4o".to_string(),
        }
    }

    #[test]
    fn test_completed_copies_correlation_fields() {
        let q = question();
        let answer = AnswerEvent::completed(&q, "1. Foo", 42);
        assert_eq!(answer.manifest_id, q.manifest_id);
        assert_eq!(answer.execution_id, q.execution_id);
        assert_eq!(answer.objective_id, q.objective_id);
        assert_eq!(answer.question_id, q.question_id);
        assert_eq!(answer.persona, q.persona);
        assert_eq!(answer.language, "FR");
        assert_eq!(answer.model, "gpt-4o");
        assert_eq!(answer.answer, "1. Foo");
        assert!(answer.is_completed());
        assert_eq!(answer.processing_time_ms, 42);
    }

    #[test]
    fn test_failed_has_empty_answer() {
        let answer = AnswerEvent::failed(&question(), 7);
        assert_eq!(answer.status, AnswerStatus::Failed);
        assert_eq!(answer.answer, "");
        assert_eq!(answer.question_id, "q-1");
    }

    #[test]
    fn test_wire_format() {
        let answer = AnswerEvent::failed(&question(), 7);
        let value = serde_json::to_value(&answer).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["processing_time_ms"], 7);
        assert_eq!(value["persona"]["role"], "analyst");
        let processed_at = value["processed_at"].as_str().unwrap();
        assert!(processed_at.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(processed_at).is_ok());
    }

    #[test]
    fn test_partition_key_is_execution_id() {
        let answer = AnswerEvent::completed(&question(), "x", 1);
        assert_eq!(answer.partition_key(), b"exec-1");
    }
}
