//! Provider use cases.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::domain::{CreateProviderCommand, Provider, ProviderRepository, UpdateProviderCommand};
use super::errors::ProvidersError;
use crate::error::AppError;
use crate::registry::{EntityLoader, to_record};

pub struct ProviderService {
    repository: Arc<dyn ProviderRepository>,
}

impl ProviderService {
    pub fn new(repository: Arc<dyn ProviderRepository>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// Returns [`ProvidersError::ProviderDuplicated`] if the tax id is taken.
    pub async fn create_provider(
        &self,
        command: CreateProviderCommand,
    ) -> Result<Provider, AppError> {
        let command = command.normalized();

        if self
            .repository
            .find_by_tax_id(&command.tax_id)
            .await?
            .is_some()
        {
            return Err(ProvidersError::ProviderDuplicated {
                tax_id: command.tax_id,
            }
            .into());
        }

        let provider = self.repository.create(command).await?;
        tracing::info!(id = provider.id, tax_id = %provider.tax_id, "provider created");
        Ok(provider)
    }

    pub async fn get_provider(&self, id: i64) -> Result<Provider, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProvidersError::ProviderNotFound { id }.into())
    }

    pub async fn list_providers(&self, offset: i64, limit: i64) -> Result<Vec<Provider>, AppError> {
        self.repository.list(offset, limit).await
    }

    pub async fn update_provider(
        &self,
        id: i64,
        command: UpdateProviderCommand,
    ) -> Result<Provider, AppError> {
        self.repository
            .update(id, command.normalized())
            .await?
            .ok_or_else(|| ProvidersError::ProviderNotFound { id }.into())
    }

    pub async fn delete_provider(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(ProvidersError::ProviderNotFound { id }.into());
        }
        tracing::info!(id, "provider deleted");
        Ok(())
    }
}

/// Resolves `provider` entity references.
pub struct ProviderLoader {
    repository: Arc<dyn ProviderRepository>,
}

impl ProviderLoader {
    pub fn new(repository: Arc<dyn ProviderRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl EntityLoader for ProviderLoader {
    async fn load(&self, id: i64) -> Result<Option<Value>, AppError> {
        to_record(self.repository.find_by_id(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::providers::domain::MockProviderRepository;
    use chrono::Utc;

    fn provider(id: i64, tax_id: &str) -> Provider {
        Provider {
            id,
            name: "Acme".to_string(),
            tax_id: tax_id.to_string(),
            email: None,
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn command(tax_id: &str) -> CreateProviderCommand {
        CreateProviderCommand {
            name: " Acme ".to_string(),
            tax_id: tax_id.to_string(),
            email: Some("Billing@Acme.test".to_string()),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_create_normalizes_fields() {
        let mut mock_repo = MockProviderRepository::new();
        mock_repo
            .expect_find_by_tax_id()
            .withf(|tax_id| tax_id == "B-1")
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .withf(|cmd| cmd.name == "Acme" && cmd.email.as_deref() == Some("billing@acme.test"))
            .times(1)
            .returning(|cmd| Ok(provider(1, &cmd.tax_id)));

        let service = ProviderService::new(Arc::new(mock_repo));

        let created = service.create_provider(command(" B-1 ")).await.unwrap();
        assert_eq!(created.tax_id, "B-1");
    }

    #[tokio::test]
    async fn test_create_duplicate_tax_id() {
        let mut mock_repo = MockProviderRepository::new();
        mock_repo
            .expect_find_by_tax_id()
            .returning(|tax_id| Ok(Some(provider(1, tax_id))));
        mock_repo.expect_create().never();

        let service = ProviderService::new(Arc::new(mock_repo));

        let err = service.create_provider(command("B-1")).await.unwrap_err();
        assert_eq!(err.code(), "provider_duplicated");
    }

    #[tokio::test]
    async fn test_update_missing_provider() {
        let mut mock_repo = MockProviderRepository::new();
        mock_repo.expect_update().returning(|_, _| Ok(None));

        let service = ProviderService::new(Arc::new(mock_repo));

        let err = service
            .update_provider(5, UpdateProviderCommand::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "provider_not_found");
    }
}
