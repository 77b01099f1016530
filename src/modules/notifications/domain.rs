//! Notification entity and repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use uuid::Uuid;

use crate::api::validation::non_blank;
use crate::error::AppError;
use crate::registry::Relatable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    /// `None` while unread.
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Relatable for Notification {
    const ENTITY_NAME: &'static str = "notification";
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct CreateNotificationCommand {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 200), custom(function = "non_blank"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 5000))]
    pub body: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, command: CreateNotificationCommand) -> Result<Notification, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Notification>, AppError>;

    /// Newest first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError>;

    /// Sets `read_at` unless already set. Returns the row, or `None` if missing.
    async fn mark_read(&self, id: i64) -> Result<Option<Notification>, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
