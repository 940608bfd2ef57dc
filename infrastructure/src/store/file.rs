//! JSON file objective store.
//!
//! The file holds an array of objective documents. It is read once at
//! startup; lookups are served from memory.

use answerer_application::ports::objective_repository::{ObjectiveRepository, RepositoryError};
use answerer_domain::ObjectiveDocument;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct JsonFileObjectiveRepository {
    path: PathBuf,
    objectives: HashMap<String, ObjectiveDocument>,
}

impl JsonFileObjectiveRepository {
    /// Read and index the objectives stored at `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();
        let raw = tokio::fs::read(&path).await.map_err(|e| {
            RepositoryError::Connection(format!("reading {}: {}", path.display(), e))
        })?;

        let documents: Vec<ObjectiveDocument> = serde_json::from_slice(&raw).map_err(|e| {
            RepositoryError::InvalidDocument {
                id: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        let mut objectives = HashMap::with_capacity(documents.len());
        for document in documents {
            if let Some(previous) = objectives.insert(document.id.clone(), document) {
                warn!(objective_id = %previous.id, "Duplicate objective id, keeping the last one");
            }
        }

        info!(path = %path.display(), objectives = objectives.len(), "Objective file loaded");
        Ok(Self { path, objectives })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }
}

#[async_trait]
impl ObjectiveRepository for JsonFileObjectiveRepository {
    async fn get_objective(&self, id: &str) -> Result<Option<ObjectiveDocument>, RepositoryError> {
        Ok(self.objectives.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_and_looks_up_objectives() {
        let file = write_file(
            r#"[
                {"_id": "65a1f0", "title": "Best CRM", "type": "top_5_recommendation",
                 "content": "Which CRM tools do agencies rely on?", "target_category": "CRM tools"},
                {"id": "65a1f1", "type": "pros_and_cons", "target_product": "HubSpot"}
            ]"#,
        );

        let repo = JsonFileObjectiveRepository::load(file.path()).await.unwrap();
        assert_eq!(repo.len(), 2);

        let crm = repo.get_objective("65a1f0").await.unwrap().unwrap();
        assert_eq!(crm.objective_type, "top_5_recommendation");
        assert_eq!(crm.target_category(), Some("CRM tools"));

        let pros = repo.get_objective("65a1f1").await.unwrap().unwrap();
        assert_eq!(pros.title, "Unknown");

        assert!(repo.get_objective("missing").await.unwrap().is_none());
        repo.ping().await.unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_a_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonFileObjectiveRepository::load(dir.path().join("absent.json")).await;
        assert!(matches!(result, Err(RepositoryError::Connection(_))));
    }

    #[tokio::test]
    async fn malformed_file_is_an_invalid_document() {
        let file = write_file(r#"[{"id": "1"}]"#);
        let result = JsonFileObjectiveRepository::load(file.path()).await;
        assert!(matches!(result, Err(RepositoryError::InvalidDocument { .. })));
    }
}
