//! PostgreSQL implementation of the currency repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::error::AppError;
use crate::modules::finance::domain::{
    CreateCurrencyCommand, Currency, CurrencyRepository, UpdateCurrencyCommand,
};

const COLUMNS: &str = "id, name, code, country, created_at, updated_at";

#[derive(FromRow)]
struct CurrencyRow {
    id: i64,
    name: String,
    code: String,
    country: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CurrencyRow> for Currency {
    fn from(r: CurrencyRow) -> Self {
        Currency {
            id: r.id,
            name: r.name,
            code: r.code,
            country: r.country,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL repository for currencies.
///
/// Explicit ids bump the serial sequence so later generated ids never collide.
pub struct PgCurrencyRepository {
    pool: Arc<PgPool>,
}

impl PgCurrencyRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CurrencyRepository for PgCurrencyRepository {
    async fn create(&self, command: CreateCurrencyCommand) -> Result<Currency, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, CurrencyRow>(&format!(
            r#"
            INSERT INTO currencies (id, name, code, country)
            VALUES (COALESCE($1::BIGINT, nextval(pg_get_serial_sequence('currencies', 'id'))), $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(command.id)
        .bind(&command.name)
        .bind(&command.code)
        .bind(&command.country)
        .fetch_one(&mut *tx)
        .await?;

        if command.id.is_some() {
            sqlx::query(
                r#"
                SELECT setval(pg_get_serial_sequence('currencies', 'id'),
                              GREATEST((SELECT MAX(id) FROM currencies), 1))
                "#,
            )
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Currency>, AppError> {
        let row = sqlx::query_as::<_, CurrencyRow>(&format!(
            "SELECT {COLUMNS} FROM currencies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Currency>, AppError> {
        let row = sqlx::query_as::<_, CurrencyRow>(&format!(
            "SELECT {COLUMNS} FROM currencies WHERE code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Currency>, AppError> {
        let rows = sqlx::query_as::<_, CurrencyRow>(&format!(
            "SELECT {COLUMNS} FROM currencies ORDER BY code OFFSET $1 LIMIT $2"
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
        command: UpdateCurrencyCommand,
    ) -> Result<Option<Currency>, AppError> {
        let update_country = command.country.is_some();
        let new_country = command.country.flatten();

        let row = sqlx::query_as::<_, CurrencyRow>(&format!(
            r#"
            UPDATE currencies SET
                name       = COALESCE($2::TEXT, name),
                country    = CASE WHEN $3 THEN $4::TEXT ELSE country END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(command.name)
        .bind(update_country)
        .bind(new_country)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM currencies WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
