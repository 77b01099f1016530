//! In-memory file metadata repository.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::infrastructure::memory::MemoryTable;
use crate::modules::storage::domain::{FileRepository, NewStoredFile, StoredFile};

#[derive(Default)]
pub struct InMemoryFileRepository {
    table: MemoryTable<StoredFile>,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn create(&self, file: NewStoredFile) -> Result<StoredFile, AppError> {
        self.table
            .insert(
                None,
                |existing, new| existing.storage_key == new.storage_key,
                |id| StoredFile {
                    id,
                    owner_id: file.owner_id,
                    file_name: file.file_name,
                    content_type: file.content_type,
                    size_bytes: file.size_bytes,
                    storage_key: file.storage_key,
                    created_at: Utc::now(),
                },
            )
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<StoredFile>, AppError> {
        Ok(self.table.get(id).await)
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<StoredFile>, AppError> {
        let mut rows = self.table.select_all(|f| f.owner_id == owner_id).await;
        rows.reverse();
        Ok(rows)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.table.remove(id).await)
    }
}
