//! PostgreSQL implementation of the role repository.
//!
//! Permissions are stored as a `TEXT[]` column; assignments live in
//! `user_roles` with `ON DELETE CASCADE` on the role.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::modules::rbac::domain::{CreateRoleCommand, Role, RoleRepository, UpdateRoleCommand};

const COLUMNS: &str = "id, name, description, permissions, created_at, updated_at";

#[derive(FromRow)]
struct RoleRow {
    id: i64,
    name: String,
    description: Option<String>,
    permissions: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RoleRow> for Role {
    fn from(r: RoleRow) -> Self {
        Role {
            id: r.id,
            name: r.name,
            description: r.description,
            permissions: r.permissions,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

pub struct PgRoleRepository {
    pool: Arc<PgPool>,
}

impl PgRoleRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn create(&self, command: CreateRoleCommand) -> Result<Role, AppError> {
        let row = sqlx::query_as::<_, RoleRow>(&format!(
            r#"
            INSERT INTO roles (name, description, permissions)
            VALUES ($1, $2, $3)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&command.name)
        .bind(&command.description)
        .bind(&command.permissions)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, AppError> {
        let row = sqlx::query_as::<_, RoleRow>(&format!("SELECT {COLUMNS} FROM roles WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AppError> {
        let row =
            sqlx::query_as::<_, RoleRow>(&format!("SELECT {COLUMNS} FROM roles WHERE name = $1"))
                .bind(name)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Role>, AppError> {
        let rows = sqlx::query_as::<_, RoleRow>(&format!(
            "SELECT {COLUMNS} FROM roles ORDER BY name OFFSET $1 LIMIT $2"
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        id: i64,
        command: UpdateRoleCommand,
    ) -> Result<Option<Role>, AppError> {
        let update_description = command.description.is_some();
        let new_description = command.description.flatten();

        let row = sqlx::query_as::<_, RoleRow>(&format!(
            r#"
            UPDATE roles SET
                name        = COALESCE($2::TEXT, name),
                description = CASE WHEN $3 THEN $4::TEXT ELSE description END,
                permissions = COALESCE($5::TEXT[], permissions),
                updated_at  = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(command.name)
        .bind(update_description)
        .bind(new_description)
        .bind(command.permissions)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn assign(&self, user_id: Uuid, role_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, role_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn unassign(&self, user_id: Uuid, role_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM user_roles WHERE user_id = $1 AND role_id = $2")
            .bind(user_id)
            .bind(role_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<Role>, AppError> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT r.id, r.name, r.description, r.permissions, r.created_at, r.updated_at
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
