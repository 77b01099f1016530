//! Relationship links and repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::api::validation::non_blank;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    pub user_id: Uuid,
    pub entity_name: String,
    pub entity_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Relationship {
    pub fn targets(&self, user_id: Uuid, entity_name: &str, entity_id: i64) -> bool {
        self.user_id == user_id && self.entity_name == entity_name && self.entity_id == entity_id
    }
}

/// A link together with its target record.
///
/// `record` is `null` when the target row has been deleted since the link was
/// created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRelationship {
    #[serde(flatten)]
    pub relationship: Relationship,
    pub record: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct CreateRelationshipCommand {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 64), custom(function = "non_blank"))]
    pub entity_name: String,

    #[validate(range(min = 1))]
    pub entity_id: i64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationshipRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the triple already exists.
    async fn create(&self, command: CreateRelationshipCommand) -> Result<Relationship, AppError>;

    async fn find(
        &self,
        user_id: Uuid,
        entity_name: &str,
        entity_id: i64,
    ) -> Result<Option<Relationship>, AppError>;

    /// Links of `user_id` in creation order, optionally of one entity name.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        entity_name: Option<String>,
    ) -> Result<Vec<Relationship>, AppError>;

    async fn delete(
        &self,
        user_id: Uuid,
        entity_name: &str,
        entity_id: i64,
    ) -> Result<bool, AppError>;
}
