//! Objective store configuration from TOML (`[store]` section)

use super::validation::{ConfigIssue, Severity};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const BACKENDS: [&str; 2] = ["mongodb", "file"];

/// Which [`ObjectiveRepository`](answerer_application::ObjectiveRepository)
/// implementation backs objective lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// MongoDB collection (requires the `mongodb` feature)
    MongoDb,
    /// JSON file loaded at startup
    File,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "file" | "json" => Ok(StoreBackend::File),
            other => Err(other.to_string()),
        }
    }
}

/// Raw objective store configuration from TOML
///
/// # Example
///
/// ```toml
/// [store]
/// backend = "mongodb"
/// mongodb_url = "mongodb://mongo:27017"
/// database = "llm_business"
/// collection = "objectives"
///
/// # or, without a database:
/// # backend = "file"
/// # file_path = "objectives.json"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// "mongodb" or "file"
    pub backend: String,
    /// MongoDB connection string
    pub mongodb_url: String,
    /// Database holding the objectives collection
    pub database: String,
    /// Collection of objective documents
    pub collection: String,
    /// JSON file of objective documents (file backend)
    pub file_path: Option<PathBuf>,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            backend: "mongodb".to_string(),
            mongodb_url: "mongodb://localhost:27017".to_string(),
            database: "llm_business".to_string(),
            collection: "objectives".to_string(),
            file_path: None,
        }
    }
}

impl FileStoreConfig {
    /// Parse the backend name, reporting an error for unknown values.
    pub fn parse_backend(&self) -> (Option<StoreBackend>, Vec<ConfigIssue>) {
        match self.backend.parse::<StoreBackend>() {
            Ok(backend) => (Some(backend), vec![]),
            Err(_) => {
                let issue = ConfigIssue::invalid_enum(
                    Severity::Error,
                    "store.backend",
                    &self.backend,
                    &BACKENDS,
                    None,
                );
                (None, vec![issue])
            }
        }
    }

    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        let (backend, mut issues) = self.parse_backend();

        match backend {
            Some(StoreBackend::MongoDb) => {
                for (field, value) in [
                    ("store.mongodb_url", &self.mongodb_url),
                    ("store.database", &self.database),
                    ("store.collection", &self.collection),
                ] {
                    if value.trim().is_empty() {
                        issues.push(ConfigIssue::empty(field));
                    }
                }
            }
            Some(StoreBackend::File) => {
                if self.file_path.is_none() {
                    issues.push(ConfigIssue::missing("store.file_path", "store.backend = \"file\""));
                }
            }
            None => {}
        }

        issues
    }
}
