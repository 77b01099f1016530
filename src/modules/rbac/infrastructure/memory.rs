//! In-memory role repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeSet;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::infrastructure::memory::MemoryTable;
use crate::modules::rbac::domain::{CreateRoleCommand, Role, RoleRepository, UpdateRoleCommand};

#[derive(Default)]
pub struct InMemoryRoleRepository {
    roles: MemoryTable<Role>,
    /// `(user_id, role_id)` pairs.
    assignments: RwLock<BTreeSet<(Uuid, i64)>>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_name(mut roles: Vec<Role>) -> Vec<Role> {
    roles.sort_by(|a, b| a.name.cmp(&b.name));
    roles
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn create(&self, command: CreateRoleCommand) -> Result<Role, AppError> {
        let now = Utc::now();
        self.roles
            .insert(
                None,
                |existing, new| existing.name == new.name,
                |id| Role {
                    id,
                    name: command.name,
                    description: command.description,
                    permissions: command.permissions,
                    created_at: now,
                    updated_at: now,
                },
            )
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, AppError> {
        Ok(self.roles.get(id).await)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AppError> {
        Ok(self.roles.find(|r| r.name == name).await)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Role>, AppError> {
        Ok(by_name(self.roles.select_all(|_| true).await)
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }

    async fn update(
        &self,
        id: i64,
        command: UpdateRoleCommand,
    ) -> Result<Option<Role>, AppError> {
        Ok(self
            .roles
            .update(id, |r| {
                if let Some(name) = command.name {
                    r.name = name;
                }
                if let Some(description) = command.description {
                    r.description = description;
                }
                if let Some(permissions) = command.permissions {
                    r.permissions = permissions;
                }
                r.updated_at = Utc::now();
            })
            .await)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let removed = self.roles.remove(id).await;
        if removed {
            self.assignments
                .write()
                .await
                .retain(|(_, role_id)| *role_id != id);
        }
        Ok(removed)
    }

    async fn assign(&self, user_id: Uuid, role_id: i64) -> Result<(), AppError> {
        self.assignments.write().await.insert((user_id, role_id));
        Ok(())
    }

    async fn unassign(&self, user_id: Uuid, role_id: i64) -> Result<bool, AppError> {
        Ok(self.assignments.write().await.remove(&(user_id, role_id)))
    }

    async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<Role>, AppError> {
        let role_ids: Vec<i64> = self
            .assignments
            .read()
            .await
            .iter()
            .filter(|(user, _)| *user == user_id)
            .map(|(_, role_id)| *role_id)
            .collect();

        Ok(by_name(
            self.roles.select_all(|r| role_ids.contains(&r.id)).await,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: Uuid = Uuid::from_u128(1);

    fn command(name: &str) -> CreateRoleCommand {
        CreateRoleCommand {
            name: name.to_string(),
            description: None,
            permissions: vec!["invoices.read".to_string()],
        }
    }

    #[tokio::test]
    async fn test_assignments_follow_role_deletion() {
        let repo = InMemoryRoleRepository::new();
        let viewer = repo.create(command("viewer")).await.unwrap();
        let admin = repo.create(command("admin")).await.unwrap();

        repo.assign(USER, viewer.id).await.unwrap();
        repo.assign(USER, admin.id).await.unwrap();
        repo.assign(USER, admin.id).await.unwrap();

        let names: Vec<String> = repo
            .roles_for_user(USER)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["admin", "viewer"]);

        assert!(repo.delete(admin.id).await.unwrap());
        assert_eq!(repo.roles_for_user(USER).await.unwrap().len(), 1);
        assert!(!repo.unassign(USER, admin.id).await.unwrap());
    }
}
