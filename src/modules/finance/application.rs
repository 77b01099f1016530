//! Currency use cases.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::domain::{CreateCurrencyCommand, Currency, CurrencyRepository, UpdateCurrencyCommand};
use super::errors::FinanceError;
use crate::error::AppError;
use crate::registry::{EntityLoader, to_record};

/// Service for managing currencies.
///
/// Codes are stored upper-case and are unique; an explicitly requested id must
/// be free.
pub struct CurrencyService {
    repository: Arc<dyn CurrencyRepository>,
}

impl CurrencyService {
    pub fn new(repository: Arc<dyn CurrencyRepository>) -> Self {
        Self { repository }
    }

    /// Creates a currency.
    ///
    /// # Errors
    ///
    /// Returns [`FinanceError::CurrencyDuplicated`] if the code or the explicit id is taken.
    pub async fn create_currency(
        &self,
        command: CreateCurrencyCommand,
    ) -> Result<Currency, AppError> {
        let command = command.normalized();

        if self.repository.find_by_code(&command.code).await?.is_some() {
            return Err(FinanceError::CurrencyDuplicated {
                field: "code",
                value: command.code,
            }
            .into());
        }

        if let Some(id) = command.id
            && self.repository.find_by_id(id).await?.is_some()
        {
            return Err(FinanceError::CurrencyDuplicated {
                field: "id",
                value: id.to_string(),
            }
            .into());
        }

        let currency = self.repository.create(command).await?;
        tracing::info!(id = currency.id, code = %currency.code, "currency created");
        Ok(currency)
    }

    /// # Errors
    ///
    /// Returns [`FinanceError::CurrencyNotFound`] if no currency has `id`.
    pub async fn get_currency(&self, id: i64) -> Result<Currency, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| FinanceError::CurrencyNotFound { id }.into())
    }

    /// Looks a currency up by code, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`FinanceError::CurrencyCodeNotFound`] if the code is unknown.
    pub async fn get_currency_by_code(&self, code: &str) -> Result<Currency, AppError> {
        let code = code.trim().to_ascii_uppercase();
        self.repository
            .find_by_code(&code)
            .await?
            .ok_or_else(|| FinanceError::CurrencyCodeNotFound { code }.into())
    }

    pub async fn list_currencies(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Currency>, AppError> {
        self.repository.list(offset, limit).await
    }

    /// # Errors
    ///
    /// Returns [`FinanceError::CurrencyNotFound`] if no currency has `id`.
    pub async fn update_currency(
        &self,
        id: i64,
        command: UpdateCurrencyCommand,
    ) -> Result<Currency, AppError> {
        self.repository
            .update(id, command.normalized())
            .await?
            .ok_or_else(|| FinanceError::CurrencyNotFound { id }.into())
    }

    /// # Errors
    ///
    /// Returns [`FinanceError::CurrencyNotFound`] if no currency has `id`.
    pub async fn delete_currency(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(FinanceError::CurrencyNotFound { id }.into());
        }
        tracing::info!(id, "currency deleted");
        Ok(())
    }
}

/// Resolves `currency` entity references.
pub struct CurrencyLoader {
    repository: Arc<dyn CurrencyRepository>,
}

impl CurrencyLoader {
    pub fn new(repository: Arc<dyn CurrencyRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl EntityLoader for CurrencyLoader {
    async fn load(&self, id: i64) -> Result<Option<Value>, AppError> {
        let currency = self.repository.find_by_id(id).await?;
        to_record(currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::finance::domain::MockCurrencyRepository;
    use axum::http::StatusCode;
    use chrono::Utc;

    fn currency(id: i64, code: &str) -> Currency {
        Currency {
            id,
            name: "Euro".to_string(),
            code: code.to_string(),
            country: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_command(id: Option<i64>, code: &str) -> CreateCurrencyCommand {
        CreateCurrencyCommand {
            id,
            name: "Euro".to_string(),
            code: code.to_string(),
            country: Some("Eurozone".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_currency_normalizes_code() {
        let mut mock_repo = MockCurrencyRepository::new();

        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "EUR")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .withf(|cmd| cmd.code == "EUR")
            .times(1)
            .returning(|cmd| Ok(currency(1, &cmd.code)));

        let service = CurrencyService::new(Arc::new(mock_repo));

        let created = service
            .create_currency(create_command(None, "eur"))
            .await
            .unwrap();

        assert_eq!(created.code, "EUR");
    }

    #[tokio::test]
    async fn test_create_currency_duplicate_code() {
        let mut mock_repo = MockCurrencyRepository::new();

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(currency(1, code))));
        mock_repo.expect_create().never();

        let service = CurrencyService::new(Arc::new(mock_repo));

        let err = service
            .create_currency(create_command(None, "EUR"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "currency_duplicated");
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_create_currency_duplicate_explicit_id() {
        let mut mock_repo = MockCurrencyRepository::new();

        mock_repo.expect_find_by_code().returning(|_| Ok(None));
        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 978)
            .times(1)
            .returning(|id| Ok(Some(currency(id, "USD"))));
        mock_repo.expect_create().never();

        let service = CurrencyService::new(Arc::new(mock_repo));

        let err = service
            .create_currency(create_command(Some(978), "EUR"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "currency_duplicated");
    }

    #[tokio::test]
    async fn test_get_currency_not_found() {
        let mut mock_repo = MockCurrencyRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = CurrencyService::new(Arc::new(mock_repo));

        let err = service.get_currency(42).await.unwrap_err();

        assert_eq!(err.code(), "currency_not_found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_currency_by_code_is_case_insensitive() {
        let mut mock_repo = MockCurrencyRepository::new();
        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "USD")
            .times(1)
            .returning(|code| Ok(Some(currency(2, code))));

        let service = CurrencyService::new(Arc::new(mock_repo));

        let found = service.get_currency_by_code(" usd").await.unwrap();
        assert_eq!(found.id, 2);
    }

    #[tokio::test]
    async fn test_delete_missing_currency() {
        let mut mock_repo = MockCurrencyRepository::new();
        mock_repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = CurrencyService::new(Arc::new(mock_repo));

        let err = service.delete_currency(9).await.unwrap_err();
        assert_eq!(err.code(), "currency_not_found");
    }

    #[tokio::test]
    async fn test_loader_serializes_currency() {
        let mut mock_repo = MockCurrencyRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok((id == 1).then(|| currency(1, "EUR"))));

        let loader = CurrencyLoader::new(Arc::new(mock_repo));

        let found = loader.load(1).await.unwrap().unwrap();
        assert_eq!(found["code"], "EUR");
        assert!(loader.load(2).await.unwrap().is_none());
    }
}
