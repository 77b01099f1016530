//! In-memory provider repository.

use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::infrastructure::memory::MemoryTable;
use crate::modules::providers::domain::{
    CreateProviderCommand, Provider, ProviderRepository, UpdateProviderCommand,
};

#[derive(Default)]
pub struct InMemoryProviderRepository {
    table: MemoryTable<Provider>,
}

impl InMemoryProviderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProviderRepository for InMemoryProviderRepository {
    async fn create(&self, command: CreateProviderCommand) -> Result<Provider, AppError> {
        let now = Utc::now();
        self.table
            .insert(
                None,
                |existing, new| existing.tax_id == new.tax_id,
                |id| Provider {
                    id,
                    name: command.name,
                    tax_id: command.tax_id,
                    email: command.email,
                    phone: command.phone,
                    created_at: now,
                    updated_at: now,
                },
            )
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Provider>, AppError> {
        Ok(self.table.get(id).await)
    }

    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Provider>, AppError> {
        Ok(self.table.find(|p| p.tax_id == tax_id).await)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Provider>, AppError> {
        let mut all = self.table.select_all(|_| true).await;
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(all
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }

    async fn update(
        &self,
        id: i64,
        command: UpdateProviderCommand,
    ) -> Result<Option<Provider>, AppError> {
        Ok(self
            .table
            .update(id, |p| {
                if let Some(name) = command.name {
                    p.name = name;
                }
                if let Some(email) = command.email {
                    p.email = email;
                }
                if let Some(phone) = command.phone {
                    p.phone = phone;
                }
                p.updated_at = Utc::now();
            })
            .await)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.table.remove(id).await)
    }
}
