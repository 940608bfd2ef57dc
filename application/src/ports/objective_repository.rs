//! Objective repository port
//!
//! Read-only access to the document store that owns objective definitions.

use answerer_domain::ObjectiveDocument;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by objective repositories.
///
/// A missing document is not an error; lookups return `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Invalid document {id}: {reason}")]
    InvalidDocument { id: String, reason: String },
}

#[async_trait]
pub trait ObjectiveRepository: Send + Sync {
    /// Look up an objective by identifier.
    async fn get_objective(&self, id: &str) -> Result<Option<ObjectiveDocument>, RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
