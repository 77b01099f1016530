//! Role management and permission lookup.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use super::domain::{CreateRoleCommand, Role, RoleRepository, UpdateRoleCommand};
use super::errors::RbacError;
use crate::error::AppError;
use crate::registry::{EntityLoader, to_record};

/// Service for roles and user role assignments.
pub struct RoleService {
    repository: Arc<dyn RoleRepository>,
}

impl RoleService {
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// Returns [`RbacError::RoleDuplicated`] if the name is taken.
    pub async fn create_role(&self, command: CreateRoleCommand) -> Result<Role, AppError> {
        let command = command.normalized();
        self.ensure_name_free(&command.name, None).await?;

        let role = self.repository.create(command).await?;
        tracing::info!(id = role.id, name = %role.name, "role created");
        Ok(role)
    }

    pub async fn get_role(&self, id: i64) -> Result<Role, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| RbacError::RoleNotFound { id }.into())
    }

    pub async fn list_roles(&self, offset: i64, limit: i64) -> Result<Vec<Role>, AppError> {
        self.repository.list(offset, limit).await
    }

    /// # Errors
    ///
    /// Returns [`RbacError::RoleNotFound`] or [`RbacError::RoleDuplicated`] on rename
    /// to a taken name.
    pub async fn update_role(&self, id: i64, command: UpdateRoleCommand) -> Result<Role, AppError> {
        let command = command.normalized();
        if let Some(name) = &command.name {
            self.ensure_name_free(name, Some(id)).await?;
        }

        self.repository
            .update(id, command)
            .await?
            .ok_or_else(|| RbacError::RoleNotFound { id }.into())
    }

    pub async fn delete_role(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(RbacError::RoleNotFound { id }.into());
        }
        tracing::info!(id, "role deleted");
        Ok(())
    }

    /// Grants a role to a user. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::RoleNotFound`] if the role does not exist.
    pub async fn assign_role(&self, user_id: Uuid, role_id: i64) -> Result<(), AppError> {
        self.get_role(role_id).await?;
        self.repository.assign(user_id, role_id).await?;
        tracing::info!(%user_id, role_id, "role assigned");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`RbacError::RoleAssignmentNotFound`] if the user does not have the role.
    pub async fn unassign_role(&self, user_id: Uuid, role_id: i64) -> Result<(), AppError> {
        if !self.repository.unassign(user_id, role_id).await? {
            return Err(RbacError::RoleAssignmentNotFound { user_id, role_id }.into());
        }
        tracing::info!(%user_id, role_id, "role unassigned");
        Ok(())
    }

    pub async fn user_roles(&self, user_id: Uuid) -> Result<Vec<Role>, AppError> {
        self.repository.roles_for_user(user_id).await
    }

    /// Union of the permissions of every role granted to `user_id`, sorted.
    pub async fn user_permissions(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        let mut permissions: Vec<String> = self
            .repository
            .roles_for_user(user_id)
            .await?
            .into_iter()
            .flat_map(|role| role.permissions)
            .collect();
        permissions.sort_unstable();
        permissions.dedup();
        Ok(permissions)
    }

    async fn ensure_name_free(&self, name: &str, except: Option<i64>) -> Result<(), AppError> {
        match self.repository.find_by_name(name).await? {
            Some(existing) if Some(existing.id) != except => Err(RbacError::RoleDuplicated {
                name: name.to_string(),
            }
            .into()),
            _ => Ok(()),
        }
    }
}

/// Resolves `role` entity references.
pub struct RoleLoader {
    repository: Arc<dyn RoleRepository>,
}

impl RoleLoader {
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl EntityLoader for RoleLoader {
    async fn load(&self, id: i64) -> Result<Option<Value>, AppError> {
        to_record(self.repository.find_by_id(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::rbac::domain::MockRoleRepository;
    use chrono::Utc;

    const USER: Uuid = Uuid::from_u128(7);

    fn role(id: i64, name: &str, permissions: &[&str]) -> Role {
        Role {
            id,
            name: name.to_string(),
            description: None,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_user_permissions_union() {
        let mut mock_repo = MockRoleRepository::new();
        mock_repo
            .expect_roles_for_user()
            .withf(|user_id| *user_id == USER)
            .times(1)
            .returning(|_| {
                Ok(vec![
                    role(1, "accountant", &["invoices.read", "invoices.write"]),
                    role(2, "auditor", &["files.read", "invoices.read"]),
                ])
            });

        let service = RoleService::new(Arc::new(mock_repo));

        let permissions = service.user_permissions(USER).await.unwrap();

        assert_eq!(
            permissions,
            vec!["files.read", "invoices.read", "invoices.write"]
        );
    }

    #[tokio::test]
    async fn test_create_duplicate_name() {
        let mut mock_repo = MockRoleRepository::new();
        mock_repo
            .expect_find_by_name()
            .returning(|name| Ok(Some(role(1, name, &[]))));
        mock_repo.expect_create().never();

        let service = RoleService::new(Arc::new(mock_repo));

        let err = service
            .create_role(CreateRoleCommand {
                name: " admin ".to_string(),
                description: None,
                permissions: vec![],
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), "role_duplicated");
    }

    #[tokio::test]
    async fn test_rename_to_own_name_is_allowed() {
        let mut mock_repo = MockRoleRepository::new();
        mock_repo
            .expect_find_by_name()
            .returning(|name| Ok(Some(role(3, name, &[]))));
        mock_repo
            .expect_update()
            .times(1)
            .returning(|id, _| Ok(Some(role(id, "admin", &[]))));

        let service = RoleService::new(Arc::new(mock_repo));

        let updated = service
            .update_role(
                3,
                UpdateRoleCommand {
                    name: Some("admin".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, 3);
    }

    #[tokio::test]
    async fn test_assign_unknown_role() {
        let mut mock_repo = MockRoleRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_assign().never();

        let service = RoleService::new(Arc::new(mock_repo));

        let err = service.assign_role(USER, 99).await.unwrap_err();
        assert_eq!(err.code(), "role_not_found");
    }

    #[tokio::test]
    async fn test_unassign_missing_assignment() {
        let mut mock_repo = MockRoleRepository::new();
        mock_repo.expect_unassign().returning(|_, _| Ok(false));

        let service = RoleService::new(Arc::new(mock_repo));

        let err = service.unassign_role(USER, 2).await.unwrap_err();
        assert_eq!(err.code(), "role_assignment_not_found");
    }
}
