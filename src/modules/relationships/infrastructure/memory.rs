//! In-memory relationship repository.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::infrastructure::memory::MemoryTable;
use crate::modules::relationships::domain::{
    CreateRelationshipCommand, Relationship, RelationshipRepository,
};

#[derive(Default)]
pub struct InMemoryRelationshipRepository {
    table: MemoryTable<Relationship>,
}

impl InMemoryRelationshipRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RelationshipRepository for InMemoryRelationshipRepository {
    async fn create(&self, command: CreateRelationshipCommand) -> Result<Relationship, AppError> {
        self.table
            .insert(
                None,
                |existing, new| existing.targets(new.user_id, &new.entity_name, new.entity_id),
                |_| Relationship {
                    user_id: command.user_id,
                    entity_name: command.entity_name,
                    entity_id: command.entity_id,
                    created_at: Utc::now(),
                },
            )
            .await
    }

    async fn find(
        &self,
        user_id: Uuid,
        entity_name: &str,
        entity_id: i64,
    ) -> Result<Option<Relationship>, AppError> {
        Ok(self
            .table
            .find(|r| r.targets(user_id, entity_name, entity_id))
            .await)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        entity_name: Option<String>,
    ) -> Result<Vec<Relationship>, AppError> {
        Ok(self
            .table
            .select_all(|r| {
                r.user_id == user_id
                    && entity_name.as_deref().is_none_or(|name| r.entity_name == name)
            })
            .await)
    }

    async fn delete(
        &self,
        user_id: Uuid,
        entity_name: &str,
        entity_id: i64,
    ) -> Result<bool, AppError> {
        Ok(self
            .table
            .remove_where(|r| r.targets(user_id, entity_name, entity_id))
            .await
            > 0)
    }
}
