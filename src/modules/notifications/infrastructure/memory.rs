//! In-memory notification repository.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::infrastructure::memory::MemoryTable;
use crate::modules::notifications::domain::{
    CreateNotificationCommand, Notification, NotificationRepository,
};

#[derive(Default)]
pub struct InMemoryNotificationRepository {
    table: MemoryTable<Notification>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(&self, command: CreateNotificationCommand) -> Result<Notification, AppError> {
        self.table
            .insert(
                None,
                |_, _| false,
                |id| Notification {
                    id,
                    user_id: command.user_id,
                    title: command.title,
                    body: command.body,
                    read_at: None,
                    created_at: Utc::now(),
                },
            )
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Notification>, AppError> {
        Ok(self.table.get(id).await)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError> {
        let mut rows = self
            .table
            .select_all(|n| n.user_id == user_id && (!unread_only || n.read_at.is_none()))
            .await;
        rows.reverse();
        Ok(rows)
    }

    async fn mark_read(&self, id: i64) -> Result<Option<Notification>, AppError> {
        Ok(self
            .table
            .update(id, |n| {
                n.read_at.get_or_insert_with(Utc::now);
            })
            .await)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.table.remove(id).await)
    }
}
