//! PostgreSQL implementation of the provider repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::error::AppError;
use crate::modules::providers::domain::{
    CreateProviderCommand, Provider, ProviderRepository, UpdateProviderCommand,
};

const COLUMNS: &str = "id, name, tax_id, email, phone, created_at, updated_at";

#[derive(FromRow)]
struct ProviderRow {
    id: i64,
    name: String,
    tax_id: String,
    email: Option<String>,
    phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProviderRow> for Provider {
    fn from(r: ProviderRow) -> Self {
        Provider {
            id: r.id,
            name: r.name,
            tax_id: r.tax_id,
            email: r.email,
            phone: r.phone,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

pub struct PgProviderRepository {
    pool: Arc<PgPool>,
}

impl PgProviderRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProviderRepository for PgProviderRepository {
    async fn create(&self, command: CreateProviderCommand) -> Result<Provider, AppError> {
        let row = sqlx::query_as::<_, ProviderRow>(&format!(
            r#"
            INSERT INTO providers (name, tax_id, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&command.name)
        .bind(&command.tax_id)
        .bind(&command.email)
        .bind(&command.phone)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Provider>, AppError> {
        let row = sqlx::query_as::<_, ProviderRow>(&format!(
            "SELECT {COLUMNS} FROM providers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Provider>, AppError> {
        let row = sqlx::query_as::<_, ProviderRow>(&format!(
            "SELECT {COLUMNS} FROM providers WHERE tax_id = $1"
        ))
        .bind(tax_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Provider>, AppError> {
        let rows = sqlx::query_as::<_, ProviderRow>(&format!(
            "SELECT {COLUMNS} FROM providers ORDER BY name, id OFFSET $1 LIMIT $2"
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
        command: UpdateProviderCommand,
    ) -> Result<Option<Provider>, AppError> {
        let update_email = command.email.is_some();
        let update_phone = command.phone.is_some();

        let row = sqlx::query_as::<_, ProviderRow>(&format!(
            r#"
            UPDATE providers SET
                name       = COALESCE($2::TEXT, name),
                email      = CASE WHEN $3 THEN $4::TEXT ELSE email END,
                phone      = CASE WHEN $5 THEN $6::TEXT ELSE phone END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(command.name)
        .bind(update_email)
        .bind(command.email.flatten())
        .bind(update_phone)
        .bind(command.phone.flatten())
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM providers WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
