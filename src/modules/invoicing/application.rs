//! Invoice use cases.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

use super::domain::{
    CreateInvoiceCommand, Invoice, InvoiceRepository, InvoiceStatus, UpdateInvoiceCommand,
};
use super::errors::InvoicingError;
use crate::error::AppError;
use crate::registry::{EntityLoader, EntityRegistry, to_record};

const PROVIDER: &str = "provider";
const CURRENCY: &str = "currency";

/// Service for invoices.
///
/// Provider and currency ids are checked through the entity registry.
pub struct InvoiceService {
    repository: Arc<dyn InvoiceRepository>,
    entities: Arc<EntityRegistry>,
}

impl InvoiceService {
    pub fn new(repository: Arc<dyn InvoiceRepository>, entities: Arc<EntityRegistry>) -> Self {
        Self {
            repository,
            entities,
        }
    }

    /// Creates a draft invoice.
    ///
    /// # Errors
    ///
    /// - [`InvoicingError::InvoiceReferenceNotFound`] if the provider or currency does not exist
    /// - [`InvoicingError::InvoiceDuplicated`] if the number is taken
    pub async fn create_invoice(&self, command: CreateInvoiceCommand) -> Result<Invoice, AppError> {
        let command = CreateInvoiceCommand {
            number: command.number.trim().to_string(),
            ..command
        };

        self.ensure_reference(PROVIDER, command.provider_id).await?;
        self.ensure_reference(CURRENCY, command.currency_id).await?;

        if self
            .repository
            .find_by_number(&command.number)
            .await?
            .is_some()
        {
            return Err(InvoicingError::InvoiceDuplicated {
                number: command.number,
            }
            .into());
        }

        let invoice = self.repository.create(command).await?;
        tracing::info!(id = invoice.id, number = %invoice.number, "invoice created");
        Ok(invoice)
    }

    pub async fn get_invoice(&self, id: i64) -> Result<Invoice, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| InvoicingError::InvoiceNotFound { id }.into())
    }

    pub async fn list_invoices(
        &self,
        status: Option<InvoiceStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Invoice>, AppError> {
        self.repository.list(status, offset, limit).await
    }

    /// Edits a draft and/or moves the invoice through its lifecycle.
    ///
    /// Content edits are checked against the current status, before the
    /// transition in the same request is applied.
    ///
    /// # Errors
    ///
    /// - [`InvoicingError::InvoiceNotFound`]
    /// - [`InvoicingError::InvoiceNotEditable`] if content changes outside draft
    /// - [`InvoicingError::InvoiceInvalidTransition`] for a disallowed status change
    pub async fn update_invoice(
        &self,
        id: i64,
        command: UpdateInvoiceCommand,
    ) -> Result<Invoice, AppError> {
        let mut invoice = self.get_invoice(id).await?;
        let current = invoice.status;

        if command.edits_content() && current != InvoiceStatus::Draft {
            return Err(InvoicingError::InvoiceNotEditable {
                id,
                status: current,
            }
            .into());
        }

        if let Some(amount_cents) = command.amount_cents {
            invoice.amount_cents = amount_cents;
        }
        if let Some(due_at) = command.due_at {
            invoice.due_at = due_at;
        }

        if let Some(next) = command.status
            && next != current
        {
            if !current.can_transition_to(next) {
                return Err(InvoicingError::InvoiceInvalidTransition {
                    from: current,
                    to: next,
                }
                .into());
            }
            if next == InvoiceStatus::Issued {
                invoice.issued_at = Some(Utc::now());
            }
            invoice.status = next;
            tracing::info!(id, from = %current, to = %next, "invoice status changed");
        }

        self.repository
            .save(invoice)
            .await?
            .ok_or_else(|| InvoicingError::InvoiceNotFound { id }.into())
    }

    /// # Errors
    ///
    /// Returns [`InvoicingError::InvoiceNotEditable`] unless the invoice is a draft.
    pub async fn delete_invoice(&self, id: i64) -> Result<(), AppError> {
        let invoice = self.get_invoice(id).await?;
        if invoice.status != InvoiceStatus::Draft {
            return Err(InvoicingError::InvoiceNotEditable {
                id,
                status: invoice.status,
            }
            .into());
        }

        if !self.repository.delete(id).await? {
            return Err(InvoicingError::InvoiceNotFound { id }.into());
        }
        tracing::info!(id, "invoice deleted");
        Ok(())
    }

    async fn ensure_reference(&self, entity_name: &'static str, entity_id: i64) -> Result<(), AppError> {
        if self.entities.exists(entity_name, entity_id).await? {
            Ok(())
        } else {
            Err(InvoicingError::InvoiceReferenceNotFound {
                entity_name,
                entity_id,
            }
            .into())
        }
    }
}

/// Resolves `invoice` entity references.
pub struct InvoiceLoader {
    repository: Arc<dyn InvoiceRepository>,
}

impl InvoiceLoader {
    pub fn new(repository: Arc<dyn InvoiceRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl EntityLoader for InvoiceLoader {
    async fn load(&self, id: i64) -> Result<Option<Value>, AppError> {
        to_record(self.repository.find_by_id(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::invoicing::domain::MockInvoiceRepository;
    use crate::registry::entities::tests::loader;
    use axum::http::StatusCode;

    struct ProviderType;
    struct CurrencyType;

    /// Registry knowing provider 1 and currency 978.
    fn entities() -> Arc<EntityRegistry> {
        let mut registry = EntityRegistry::new();
        registry
            .register::<ProviderType>(PROVIDER, loader(&[1]))
            .unwrap();
        registry
            .register::<CurrencyType>(CURRENCY, loader(&[978]))
            .unwrap();
        Arc::new(registry)
    }

    fn invoice(id: i64, status: InvoiceStatus) -> Invoice {
        Invoice {
            id,
            number: format!("INV-{id}"),
            provider_id: 1,
            currency_id: 978,
            amount_cents: 10_000,
            status,
            due_at: None,
            issued_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_command(provider_id: i64, currency_id: i64) -> CreateInvoiceCommand {
        CreateInvoiceCommand {
            number: " INV-1 ".to_string(),
            provider_id,
            currency_id,
            amount_cents: 10_000,
            due_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_invoice_checks_references() {
        let mut mock_repo = MockInvoiceRepository::new();
        mock_repo.expect_find_by_number().returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .withf(|cmd| cmd.number == "INV-1")
            .times(1)
            .returning(|_| Ok(invoice(1, InvoiceStatus::Draft)));

        let service = InvoiceService::new(Arc::new(mock_repo), entities());

        let created = service.create_invoice(create_command(1, 978)).await.unwrap();
        assert_eq!(created.status, InvoiceStatus::Draft);
    }

    #[tokio::test]
    async fn test_create_invoice_missing_currency() {
        let mut mock_repo = MockInvoiceRepository::new();
        mock_repo.expect_create().never();

        let service = InvoiceService::new(Arc::new(mock_repo), entities());

        let err = service
            .create_invoice(create_command(1, 840))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "invoice_reference_not_found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_issue_sets_issued_at() {
        let mut mock_repo = MockInvoiceRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(invoice(id, InvoiceStatus::Draft))));
        mock_repo
            .expect_save()
            .withf(|inv| inv.status == InvoiceStatus::Issued && inv.issued_at.is_some())
            .times(1)
            .returning(|inv| Ok(Some(inv)));

        let service = InvoiceService::new(Arc::new(mock_repo), entities());

        let issued = service
            .update_invoice(
                1,
                UpdateInvoiceCommand {
                    status: Some(InvoiceStatus::Issued),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(issued.status, InvoiceStatus::Issued);
    }

    #[tokio::test]
    async fn test_draft_cannot_be_paid() {
        let mut mock_repo = MockInvoiceRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(invoice(id, InvoiceStatus::Draft))));
        mock_repo.expect_save().never();

        let service = InvoiceService::new(Arc::new(mock_repo), entities());

        let err = service
            .update_invoice(
                1,
                UpdateInvoiceCommand {
                    status: Some(InvoiceStatus::Paid),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), "invoice_invalid_transition");
    }

    #[tokio::test]
    async fn test_issued_invoice_amount_is_frozen() {
        let mut mock_repo = MockInvoiceRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(invoice(id, InvoiceStatus::Issued))));
        mock_repo.expect_save().never();

        let service = InvoiceService::new(Arc::new(mock_repo), entities());

        let err = service
            .update_invoice(
                1,
                UpdateInvoiceCommand {
                    amount_cents: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), "invoice_not_editable");
    }

    #[tokio::test]
    async fn test_only_drafts_are_deleted() {
        let mut mock_repo = MockInvoiceRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(invoice(id, InvoiceStatus::Paid))));
        mock_repo.expect_delete().never();

        let service = InvoiceService::new(Arc::new(mock_repo), entities());

        let err = service.delete_invoice(1).await.unwrap_err();
        assert_eq!(err.code(), "invoice_not_editable");
    }
}
