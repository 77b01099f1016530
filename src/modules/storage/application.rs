//! File upload, download and deletion.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

use super::domain::{BlobStore, FileRepository, NewStoredFile, StoredFile, is_valid_file_name};
use super::errors::StorageError;
use crate::error::AppError;
use crate::registry::{EntityLoader, to_record};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Service coordinating file metadata and blob content.
///
/// Content is written before metadata, so a listed file always has bytes.
pub struct FileService {
    repository: Arc<dyn FileRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl FileService {
    pub fn new(repository: Arc<dyn FileRepository>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { repository, blobs }
    }

    /// Stores an uploaded file.
    ///
    /// # Errors
    ///
    /// - [`StorageError::FileNameInvalid`] for empty names or names with path separators
    /// - [`StorageError::FileEmpty`] for an empty body
    pub async fn upload(
        &self,
        owner_id: Uuid,
        file_name: &str,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Result<StoredFile, AppError> {
        let file_name = file_name.trim();
        if !is_valid_file_name(file_name) {
            return Err(StorageError::FileNameInvalid {
                file_name: file_name.to_string(),
            }
            .into());
        }
        if bytes.is_empty() {
            return Err(StorageError::FileEmpty.into());
        }

        let storage_key = Uuid::new_v4().to_string();
        let size_bytes = i64::try_from(bytes.len()).unwrap_or(i64::MAX);

        self.blobs.put(&storage_key, bytes).await?;

        let created = self
            .repository
            .create(NewStoredFile {
                owner_id,
                file_name: file_name.to_string(),
                content_type: content_type
                    .filter(|ct| !ct.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
                size_bytes,
                storage_key: storage_key.clone(),
            })
            .await;

        match created {
            Ok(file) => {
                tracing::info!(id = file.id, %owner_id, size_bytes, "file stored");
                Ok(file)
            }
            Err(e) => {
                if let Err(cleanup) = self.blobs.delete(&storage_key).await {
                    tracing::warn!(%storage_key, error = %cleanup, "orphaned blob left behind");
                }
                Err(e)
            }
        }
    }

    pub async fn get(&self, id: i64) -> Result<StoredFile, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| StorageError::FileNotFound { id }.into())
    }

    /// Metadata and bytes of a file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::FileNotFound`] for unknown ids and
    /// [`AppError::Internal`] if the metadata points at missing content.
    pub async fn content(&self, id: i64) -> Result<(StoredFile, Vec<u8>), AppError> {
        let file = self.get(id).await?;
        let bytes = self.blobs.get(&file.storage_key).await?.ok_or_else(|| {
            AppError::internal("File content is missing", json!({ "id": file.id }))
        })?;
        Ok((file, bytes))
    }

    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<StoredFile>, AppError> {
        self.repository.list_for_owner(owner_id).await
    }

    /// Deletes the metadata, then the content.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let file = self.get(id).await?;
        if !self.repository.delete(id).await? {
            return Err(StorageError::FileNotFound { id }.into());
        }
        self.blobs.delete(&file.storage_key).await?;
        tracing::info!(id, "file deleted");
        Ok(())
    }
}

/// Resolves `file` entity references to metadata.
pub struct FileLoader {
    repository: Arc<dyn FileRepository>,
}

impl FileLoader {
    pub fn new(repository: Arc<dyn FileRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl EntityLoader for FileLoader {
    async fn load(&self, id: i64) -> Result<Option<Value>, AppError> {
        to_record(self.repository.find_by_id(id).await?)
    }
}
