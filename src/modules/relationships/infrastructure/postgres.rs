//! PostgreSQL implementation of the relationship repository.
//!
//! `user_relationships` has a unique index on `(user_id, entity_name, entity_id)`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::modules::relationships::domain::{
    CreateRelationshipCommand, Relationship, RelationshipRepository,
};

const COLUMNS: &str = "user_id, entity_name, entity_id, created_at";

#[derive(FromRow)]
struct RelationshipRow {
    user_id: Uuid,
    entity_name: String,
    entity_id: i64,
    created_at: DateTime<Utc>,
}

impl From<RelationshipRow> for Relationship {
    fn from(r: RelationshipRow) -> Self {
        Relationship {
            user_id: r.user_id,
            entity_name: r.entity_name,
            entity_id: r.entity_id,
            created_at: r.created_at,
        }
    }
}

pub struct PgRelationshipRepository {
    pool: Arc<PgPool>,
}

impl PgRelationshipRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RelationshipRepository for PgRelationshipRepository {
    async fn create(&self, command: CreateRelationshipCommand) -> Result<Relationship, AppError> {
        let row = sqlx::query_as::<_, RelationshipRow>(&format!(
            r#"
            INSERT INTO user_relationships (user_id, entity_name, entity_id)
            VALUES ($1, $2, $3)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(command.user_id)
        .bind(&command.entity_name)
        .bind(command.entity_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find(
        &self,
        user_id: Uuid,
        entity_name: &str,
        entity_id: i64,
    ) -> Result<Option<Relationship>, AppError> {
        let row = sqlx::query_as::<_, RelationshipRow>(&format!(
            r#"
            SELECT {COLUMNS} FROM user_relationships
            WHERE user_id = $1 AND entity_name = $2 AND entity_id = $3
            "#
        ))
        .bind(user_id)
        .bind(entity_name)
        .bind(entity_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        entity_name: Option<String>,
    ) -> Result<Vec<Relationship>, AppError> {
        let rows = sqlx::query_as::<_, RelationshipRow>(&format!(
            r#"
            SELECT {COLUMNS} FROM user_relationships
            WHERE user_id = $1 AND ($2::TEXT IS NULL OR entity_name = $2)
            ORDER BY id
            "#
        ))
        .bind(user_id)
        .bind(entity_name)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(
        &self,
        user_id: Uuid,
        entity_name: &str,
        entity_id: i64,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM user_relationships
            WHERE user_id = $1 AND entity_name = $2 AND entity_id = $3
            "#,
        )
        .bind(user_id)
        .bind(entity_name)
        .bind(entity_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
