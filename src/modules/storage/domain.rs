//! Stored file metadata, the repository port and the blob store port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::registry::Relatable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredFile {
    pub id: i64,
    pub owner_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    /// Key of the content in the [`BlobStore`].
    #[serde(skip_serializing)]
    pub storage_key: String,
    pub created_at: DateTime<Utc>,
}

impl Relatable for StoredFile {
    const ENTITY_NAME: &'static str = "file";
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStoredFile {
    pub owner_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub storage_key: String,
}

/// Rejects empty names, path separators and names over 255 bytes.
pub fn is_valid_file_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 255
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn create(&self, file: NewStoredFile) -> Result<StoredFile, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<StoredFile>, AppError>;

    /// Newest first.
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<StoredFile>, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

/// Byte storage addressed by key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), AppError>;

    /// Returns `None` if nothing is stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError>;

    /// Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert!(is_valid_file_name("invoice-2024.pdf"));
        assert!(is_valid_file_name("report final.xlsx"));
        assert!(!is_valid_file_name(""));
        assert!(!is_valid_file_name(".."));
        assert!(!is_valid_file_name("../etc/passwd"));
        assert!(!is_valid_file_name("dir\\file"));
        assert!(!is_valid_file_name(&"a".repeat(256)));
    }
}
