//! Notification error kinds.

use axum::http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;

use crate::error::{ApiException, AppError};

#[derive(Debug, Error)]
pub enum NotificationsError {
    #[error("Notification {id} not found")]
    NotificationNotFound { id: i64 },
}

impl ApiException for NotificationsError {
    fn status(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }

    fn code(&self) -> &'static str {
        "notification_not_found"
    }

    fn details(&self) -> Value {
        match self {
            NotificationsError::NotificationNotFound { id } => json!({ "id": id }),
        }
    }
}

impl From<NotificationsError> for AppError {
    fn from(e: NotificationsError) -> Self {
        AppError::exception(e)
    }
}
