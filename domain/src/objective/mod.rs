//! Objective documents as read from the document store.

use crate::core::string::excerpt;
use serde::{Deserialize, Serialize};

/// Default bound for the content excerpt used as question text.
pub const DEFAULT_EXCERPT_CHARS: usize = 200;

fn unknown_title() -> String {
    "Unknown".to_string()
}

/// A stored task definition (read-only to this service).
///
/// `objective_type` drives strategy selection; `content` supplies the
/// question text; the optional targets shape the instruction clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveDocument {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default = "unknown_title")]
    pub title: String,
    #[serde(rename = "type")]
    pub objective_type: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub target_product: Option<String>,
    #[serde(default)]
    pub target_category: Option<String>,
}

impl ObjectiveDocument {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        objective_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            objective_type: objective_type.into(),
            content: None,
            target_product: None,
            target_category: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_target_product(mut self, product: impl Into<String>) -> Self {
        self.target_product = Some(product.into());
        self
    }

    pub fn with_target_category(mut self, category: impl Into<String>) -> Self {
        self.target_category = Some(category.into());
        self
    }

    /// Question text for prompt rendering.
    ///
    /// The bounded content excerpt when there is content, the title otherwise.
    pub fn question_text(&self, max_chars: usize) -> String {
        match self.content.as_deref().map(str::trim) {
            Some(content) if !content.is_empty() => excerpt(content, max_chars),
            _ => self.title.trim().to_string(),
        }
    }

    pub fn target_product(&self) -> Option<&str> {
        non_blank(self.target_product.as_deref())
    }

    pub fn target_category(&self) -> Option<&str> {
        non_blank(self.target_category.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_text_prefers_content() {
        let doc = ObjectiveDocument::new("1", "Best CRM", "top_5_recommendation")
            .with_content("Which CRM tools do small agencies rely on?");
        assert_eq!(
            doc.question_text(DEFAULT_EXCERPT_CHARS),
            "Which CRM tools do small agencies rely on?"
        );
    }

    #[test]
    fn test_question_text_falls_back_to_title() {
        let doc = ObjectiveDocument::new("1", "Best CRM", "top_5_recommendation");
        assert_eq!(doc.question_text(DEFAULT_EXCERPT_CHARS), "Best CRM");

        let doc = doc.with_content("   ");
        assert_eq!(doc.question_text(DEFAULT_EXCERPT_CHARS), "Best CRM");
    }

    #[test]
    fn test_question_text_is_bounded() {
        let doc = ObjectiveDocument::new("1", "t", "pros_and_cons").with_content("a".repeat(500));
        let text = doc.question_text(200);
        assert_eq!(text.chars().count(), 203);
        assert!(text.ends_with("..."));
    }

    #[test]
    fn test_blank_targets_are_absent() {
        let doc = ObjectiveDocument::new("1", "t", "main_competitors")
            .with_target_product(" ")
            .with_target_category("CRM");
        assert_eq!(doc.target_product(), None);
        assert_eq!(doc.target_category(), Some("CRM"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let doc: ObjectiveDocument =
            serde_json::from_str(r#"{"id": "abc", "type": "pros_and_cons"}"#).unwrap();
        assert_eq!(doc.title, "Unknown");
        assert_eq!(doc.objective_type, "pros_and_cons");
        assert!(doc.content.is_none());
    }
}
