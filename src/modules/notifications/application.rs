//! Notification use cases.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use super::domain::{CreateNotificationCommand, Notification, NotificationRepository};
use super::errors::NotificationsError;
use crate::error::AppError;
use crate::registry::{EntityLoader, to_record};

pub struct NotificationService {
    repository: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }

    pub async fn notify(&self, command: CreateNotificationCommand) -> Result<Notification, AppError> {
        let command = CreateNotificationCommand {
            title: command.title.trim().to_string(),
            ..command
        };
        let notification = self.repository.create(command).await?;
        tracing::debug!(id = notification.id, user_id = %notification.user_id, "notification created");
        Ok(notification)
    }

    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError> {
        self.repository.list_for_user(user_id, unread_only).await
    }

    /// Marks a notification read. Marking twice keeps the first `read_at`.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationsError::NotificationNotFound`] if it does not exist.
    pub async fn mark_read(&self, id: i64) -> Result<Notification, AppError> {
        self.repository
            .mark_read(id)
            .await?
            .ok_or_else(|| NotificationsError::NotificationNotFound { id }.into())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(NotificationsError::NotificationNotFound { id }.into());
        }
        Ok(())
    }
}

/// Resolves `notification` entity references.
pub struct NotificationLoader {
    repository: Arc<dyn NotificationRepository>,
}

impl NotificationLoader {
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl EntityLoader for NotificationLoader {
    async fn load(&self, id: i64) -> Result<Option<Value>, AppError> {
        to_record(self.repository.find_by_id(id).await?)
    }
}
