//! PostgreSQL implementation of the file metadata repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::modules::storage::domain::{FileRepository, NewStoredFile, StoredFile};

const COLUMNS: &str = "id, owner_id, file_name, content_type, size_bytes, storage_key, created_at";

#[derive(FromRow)]
struct StoredFileRow {
    id: i64,
    owner_id: Uuid,
    file_name: String,
    content_type: String,
    size_bytes: i64,
    storage_key: String,
    created_at: DateTime<Utc>,
}

impl From<StoredFileRow> for StoredFile {
    fn from(r: StoredFileRow) -> Self {
        StoredFile {
            id: r.id,
            owner_id: r.owner_id,
            file_name: r.file_name,
            content_type: r.content_type,
            size_bytes: r.size_bytes,
            storage_key: r.storage_key,
            created_at: r.created_at,
        }
    }
}

pub struct PgFileRepository {
    pool: Arc<PgPool>,
}

impl PgFileRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn create(&self, file: NewStoredFile) -> Result<StoredFile, AppError> {
        let row = sqlx::query_as::<_, StoredFileRow>(&format!(
            r#"
            INSERT INTO stored_files (owner_id, file_name, content_type, size_bytes, storage_key)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(file.owner_id)
        .bind(&file.file_name)
        .bind(&file.content_type)
        .bind(file.size_bytes)
        .bind(&file.storage_key)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<StoredFile>, AppError> {
        let row = sqlx::query_as::<_, StoredFileRow>(&format!(
            "SELECT {COLUMNS} FROM stored_files WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<StoredFile>, AppError> {
        let rows = sqlx::query_as::<_, StoredFileRow>(&format!(
            "SELECT {COLUMNS} FROM stored_files WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM stored_files WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
