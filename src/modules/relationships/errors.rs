//! Relationship error kinds. Unknown entity names are reported by the registry
//! as `unknown_entity_name`.

use axum::http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;
use uuid::Uuid;

use crate::error::{ApiException, AppError};

#[derive(Debug, Error)]
pub enum RelationshipsError {
    #[error("User {user_id} has no relationship with {entity_name} {entity_id}")]
    RelationshipNotFound {
        user_id: Uuid,
        entity_name: String,
        entity_id: i64,
    },

    #[error("{entity_name} {entity_id} not found")]
    RelationshipTargetNotFound { entity_name: String, entity_id: i64 },

    #[error("User {user_id} is already related to {entity_name} {entity_id}")]
    RelationshipDuplicated {
        user_id: Uuid,
        entity_name: String,
        entity_id: i64,
    },
}

impl ApiException for RelationshipsError {
    fn status(&self) -> StatusCode {
        match self {
            RelationshipsError::RelationshipNotFound { .. }
            | RelationshipsError::RelationshipTargetNotFound { .. } => StatusCode::NOT_FOUND,
            RelationshipsError::RelationshipDuplicated { .. } => StatusCode::CONFLICT,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            RelationshipsError::RelationshipNotFound { .. } => "relationship_not_found",
            RelationshipsError::RelationshipTargetNotFound { .. } => {
                "relationship_target_not_found"
            }
            RelationshipsError::RelationshipDuplicated { .. } => "relationship_duplicated",
        }
    }

    fn details(&self) -> Value {
        match self {
            RelationshipsError::RelationshipNotFound {
                user_id,
                entity_name,
                entity_id,
            }
            | RelationshipsError::RelationshipDuplicated {
                user_id,
                entity_name,
                entity_id,
            } => json!({
                "user_id": user_id,
                "entity_name": entity_name,
                "entity_id": entity_id,
            }),
            RelationshipsError::RelationshipTargetNotFound {
                entity_name,
                entity_id,
            } => json!({ "entity_name": entity_name, "entity_id": entity_id }),
        }
    }
}

impl From<RelationshipsError> for AppError {
    fn from(e: RelationshipsError) -> Self {
        AppError::exception(e)
    }
}
