//! Creating, listing and resolving user relationships.

use std::sync::Arc;
use uuid::Uuid;

use super::domain::{
    CreateRelationshipCommand, Relationship, RelationshipRepository, ResolvedRelationship,
};
use super::errors::RelationshipsError;
use crate::error::AppError;
use crate::registry::EntityRegistry;

pub struct RelationshipService {
    repository: Arc<dyn RelationshipRepository>,
    entities: Arc<EntityRegistry>,
}

impl RelationshipService {
    pub fn new(repository: Arc<dyn RelationshipRepository>, entities: Arc<EntityRegistry>) -> Self {
        Self {
            repository,
            entities,
        }
    }

    /// Links a user to an existing record.
    ///
    /// # Errors
    ///
    /// - `unknown_entity_name` if the name is not registered
    /// - [`RelationshipsError::RelationshipTargetNotFound`] if the record does not exist
    /// - [`RelationshipsError::RelationshipDuplicated`] if the link exists
    pub async fn create(
        &self,
        command: CreateRelationshipCommand,
    ) -> Result<Relationship, AppError> {
        let command = CreateRelationshipCommand {
            entity_name: command.entity_name.trim().to_string(),
            ..command
        };

        if !self
            .entities
            .exists(&command.entity_name, command.entity_id)
            .await?
        {
            return Err(RelationshipsError::RelationshipTargetNotFound {
                entity_name: command.entity_name,
                entity_id: command.entity_id,
            }
            .into());
        }

        if self
            .repository
            .find(command.user_id, &command.entity_name, command.entity_id)
            .await?
            .is_some()
        {
            return Err(RelationshipsError::RelationshipDuplicated {
                user_id: command.user_id,
                entity_name: command.entity_name,
                entity_id: command.entity_id,
            }
            .into());
        }

        let relationship = self.repository.create(command).await?;
        tracing::info!(
            user_id = %relationship.user_id,
            entity_name = %relationship.entity_name,
            entity_id = relationship.entity_id,
            "relationship created"
        );
        Ok(relationship)
    }

    /// # Errors
    ///
    /// Returns `unknown_entity_name` if the filter names an unregistered entity.
    pub async fn list(
        &self,
        user_id: Uuid,
        entity_name: Option<String>,
    ) -> Result<Vec<Relationship>, AppError> {
        if let Some(name) = &entity_name {
            self.entities.resolve(name)?;
        }
        self.repository.list_for_user(user_id, entity_name).await
    }

    /// Every link of `user_id` with its record loaded through the registry.
    pub async fn resolved(&self, user_id: Uuid) -> Result<Vec<ResolvedRelationship>, AppError> {
        let links = self.repository.list_for_user(user_id, None).await?;

        let mut resolved = Vec::with_capacity(links.len());
        for relationship in links {
            let record = self
                .entities
                .load(&relationship.entity_name, relationship.entity_id)
                .await?;
            resolved.push(ResolvedRelationship {
                relationship,
                record,
            });
        }
        Ok(resolved)
    }

    pub async fn delete(
        &self,
        user_id: Uuid,
        entity_name: &str,
        entity_id: i64,
    ) -> Result<(), AppError> {
        if !self
            .repository
            .delete(user_id, entity_name, entity_id)
            .await?
        {
            return Err(RelationshipsError::RelationshipNotFound {
                user_id,
                entity_name: entity_name.to_string(),
                entity_id,
            }
            .into());
        }
        Ok(())
    }
}
