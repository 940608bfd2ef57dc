//! MongoDB objective store.
//!
//! Objectives live in one collection keyed by `ObjectId`. Documents are read
//! as raw BSON and mapped field by field so that the hex `_id` becomes the
//! objective id.

use answerer_application::ports::objective_repository::{ObjectiveRepository, RepositoryError};
use answerer_domain::ObjectiveDocument;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Client, Collection, Database};
use tracing::{debug, info};

pub struct MongoObjectiveRepository {
    database: Database,
    collection: Collection<Document>,
}

impl MongoObjectiveRepository {
    pub async fn connect(
        url: &str,
        database: &str,
        collection: &str,
    ) -> Result<Self, RepositoryError> {
        let client = Client::with_uri_str(url)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        let database = client.database(database);
        let collection = database.collection::<Document>(collection);

        info!(
            database = %database.name(),
            collection = %collection.name(),
            "MongoDB objective store configured"
        );
        Ok(Self {
            database,
            collection,
        })
    }
}

#[async_trait]
impl ObjectiveRepository for MongoObjectiveRepository {
    async fn get_objective(&self, id: &str) -> Result<Option<ObjectiveDocument>, RepositoryError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            debug!(objective_id = %id, "Objective id is not an ObjectId");
            return Ok(None);
        };

        let found = self
            .collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        found.map(objective_from_bson).transpose()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| RepositoryError::Connection(e.to_string()))
    }
}

fn objective_from_bson(document: Document) -> Result<ObjectiveDocument, RepositoryError> {
    let id = match document.get("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) => s.clone(),
        other => {
            return Err(RepositoryError::InvalidDocument {
                id: format!("{:?}", other),
                reason: "missing or unsupported _id".to_string(),
            });
        }
    };

    let text = |field: &str| document.get_str(field).ok().map(str::to_string);

    let objective_type = text("type").ok_or_else(|| RepositoryError::InvalidDocument {
        id: id.clone(),
        reason: "missing string field 'type'".to_string(),
    })?;

    let mut objective = ObjectiveDocument::new(
        id,
        text("title").unwrap_or_else(|| "Unknown".to_string()),
        objective_type,
    );
    objective.content = text("content");
    objective.target_product = text("target_product");
    objective.target_category = text("target_category");
    Ok(objective)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_object_id_and_fields() {
        let oid = ObjectId::parse_str("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let document = doc! {
            "_id": oid,
            "title": "Best CRM",
            "type": "top_5_recommendation",
            "content": "Which CRM tools do agencies rely on?",
            "target_category": "CRM tools",
            "created_by": "ops",
        };

        let objective = objective_from_bson(document).unwrap();
        assert_eq!(objective.id, "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(objective.title, "Best CRM");
        assert_eq!(objective.objective_type, "top_5_recommendation");
        assert_eq!(objective.target_category(), Some("CRM tools"));
        assert!(objective.target_product.is_none());
    }

    #[test]
    fn missing_title_defaults_to_unknown() {
        let document = doc! { "_id": "plain-id", "type": "pros_and_cons" };
        let objective = objective_from_bson(document).unwrap();
        assert_eq!(objective.id, "plain-id");
        assert_eq!(objective.title, "Unknown");
    }

    #[test]
    fn missing_type_is_invalid() {
        let document = doc! { "_id": "plain-id", "title": "No type" };
        assert!(matches!(
            objective_from_bson(document),
            Err(RepositoryError::InvalidDocument { .. })
        ));
    }
}
