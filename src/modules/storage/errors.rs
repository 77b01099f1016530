//! File storage error kinds.

use axum::http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;

use crate::error::{ApiException, AppError};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File {id} not found")]
    FileNotFound { id: i64 },

    #[error("Uploaded file is empty")]
    FileEmpty,

    #[error("Invalid file name '{file_name}'")]
    FileNameInvalid { file_name: String },
}

impl ApiException for StorageError {
    fn status(&self) -> StatusCode {
        match self {
            StorageError::FileNotFound { .. } => StatusCode::NOT_FOUND,
            StorageError::FileEmpty | StorageError::FileNameInvalid { .. } => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            StorageError::FileNotFound { .. } => "file_not_found",
            StorageError::FileEmpty => "file_empty",
            StorageError::FileNameInvalid { .. } => "file_name_invalid",
        }
    }

    fn details(&self) -> Value {
        match self {
            StorageError::FileNotFound { id } => json!({ "id": id }),
            StorageError::FileEmpty => json!({}),
            StorageError::FileNameInvalid { file_name } => json!({ "file_name": file_name }),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::exception(e)
    }
}
