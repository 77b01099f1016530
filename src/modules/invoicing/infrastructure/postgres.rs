//! PostgreSQL implementation of the invoice repository.
//!
//! `status` is a `TEXT` column constrained by a `CHECK` to the lowercase
//! status names.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::error::AppError;
use crate::modules::invoicing::domain::{
    CreateInvoiceCommand, Invoice, InvoiceRepository, InvoiceStatus,
};

const COLUMNS: &str = "id, number, provider_id, currency_id, amount_cents, status, due_at, \
                       issued_at, created_at, updated_at";

#[derive(FromRow)]
struct InvoiceRow {
    id: i64,
    number: String,
    provider_id: i64,
    currency_id: i64,
    amount_cents: i64,
    status: String,
    due_at: Option<DateTime<Utc>>,
    issued_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = AppError;

    fn try_from(r: InvoiceRow) -> Result<Self, Self::Error> {
        let status = r.status.parse::<InvoiceStatus>().map_err(|reason| {
            AppError::internal("Corrupt invoice row", json!({ "id": r.id, "reason": reason }))
        })?;

        Ok(Invoice {
            id: r.id,
            number: r.number,
            provider_id: r.provider_id,
            currency_id: r.currency_id,
            amount_cents: r.amount_cents,
            status,
            due_at: r.due_at,
            issued_at: r.issued_at,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

pub struct PgInvoiceRepository {
    pool: Arc<PgPool>,
}

impl PgInvoiceRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    async fn create(&self, command: CreateInvoiceCommand) -> Result<Invoice, AppError> {
        let row = sqlx::query_as::<_, InvoiceRow>(&format!(
            r#"
            INSERT INTO invoices (number, provider_id, currency_id, amount_cents, status, due_at)
            VALUES ($1, $2, $3, $4, 'draft', $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&command.number)
        .bind(command.provider_id)
        .bind(command.currency_id)
        .bind(command.amount_cents)
        .bind(command.due_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>, AppError> {
        let row = sqlx::query_as::<_, InvoiceRow>(&format!(
            "SELECT {COLUMNS} FROM invoices WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<Invoice>, AppError> {
        let row = sqlx::query_as::<_, InvoiceRow>(&format!(
            "SELECT {COLUMNS} FROM invoices WHERE number = $1"
        ))
        .bind(number)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list(
        &self,
        status: Option<InvoiceStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Invoice>, AppError> {
        let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
            r#"
            SELECT {COLUMNS} FROM invoices
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY id
            OFFSET $2 LIMIT $3
            "#
        ))
        .bind(status.map(|s| s.as_str()))
        .bind(offset)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn save(&self, invoice: Invoice) -> Result<Option<Invoice>, AppError> {
        let row = sqlx::query_as::<_, InvoiceRow>(&format!(
            r#"
            UPDATE invoices SET
                amount_cents = $2,
                due_at       = $3,
                status       = $4,
                issued_at    = $5,
                updated_at   = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(invoice.id)
        .bind(invoice.amount_cents)
        .bind(invoice.due_at)
        .bind(invoice.status.as_str())
        .bind(invoice.issued_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
