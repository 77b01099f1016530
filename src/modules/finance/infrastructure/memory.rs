//! In-memory currency repository.

use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::infrastructure::memory::MemoryTable;
use crate::modules::finance::domain::{
    CreateCurrencyCommand, Currency, CurrencyRepository, UpdateCurrencyCommand,
};

#[derive(Default)]
pub struct InMemoryCurrencyRepository {
    table: MemoryTable<Currency>,
}

impl InMemoryCurrencyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CurrencyRepository for InMemoryCurrencyRepository {
    async fn create(&self, command: CreateCurrencyCommand) -> Result<Currency, AppError> {
        let now = Utc::now();
        self.table
            .insert(
                command.id,
                |existing, new| existing.code == new.code,
                |id| Currency {
                    id,
                    name: command.name,
                    code: command.code,
                    country: command.country,
                    created_at: now,
                    updated_at: now,
                },
            )
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Currency>, AppError> {
        Ok(self.table.get(id).await)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Currency>, AppError> {
        Ok(self.table.find(|c| c.code == code).await)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Currency>, AppError> {
        let mut all = self.table.select_all(|_| true).await;
        all.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(all
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }

    async fn update(
        &self,
        id: i64,
        command: UpdateCurrencyCommand,
    ) -> Result<Option<Currency>, AppError> {
        Ok(self
            .table
            .update(id, |c| {
                if let Some(name) = command.name {
                    c.name = name;
                }
                if let Some(country) = command.country {
                    c.country = country;
                }
                c.updated_at = Utc::now();
            })
            .await)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.table.remove(id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(id: Option<i64>, code: &str) -> CreateCurrencyCommand {
        CreateCurrencyCommand {
            id,
            name: code.to_string(),
            code: code.to_string(),
            country: None,
        }
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_code() {
        let repo = InMemoryCurrencyRepository::new();
        repo.create(command(None, "USD")).await.unwrap();
        repo.create(command(None, "EUR")).await.unwrap();

        let codes: Vec<String> = repo
            .list(0, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.code)
            .collect();

        assert_eq!(codes, vec!["EUR", "USD"]);
    }

    #[tokio::test]
    async fn test_duplicate_code_conflicts() {
        let repo = InMemoryCurrencyRepository::new();
        repo.create(command(None, "EUR")).await.unwrap();

        let err = repo.create(command(None, "EUR")).await.unwrap_err();
        assert_eq!(err.code(), "conflict");
    }

    #[tokio::test]
    async fn test_update_clears_country() {
        let repo = InMemoryCurrencyRepository::new();
        let mut cmd = command(Some(978), "EUR");
        cmd.country = Some("Eurozone".to_string());
        repo.create(cmd).await.unwrap();

        let updated = repo
            .update(
                978,
                UpdateCurrencyCommand {
                    name: None,
                    country: Some(None),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.country, None);
        assert_eq!(updated.name, "EUR");
    }
}
