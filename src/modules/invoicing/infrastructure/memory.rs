//! In-memory invoice repository.

use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::infrastructure::memory::MemoryTable;
use crate::modules::invoicing::domain::{
    CreateInvoiceCommand, Invoice, InvoiceRepository, InvoiceStatus,
};

#[derive(Default)]
pub struct InMemoryInvoiceRepository {
    table: MemoryTable<Invoice>,
}

impl InMemoryInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn create(&self, command: CreateInvoiceCommand) -> Result<Invoice, AppError> {
        let now = Utc::now();
        self.table
            .insert(
                None,
                |existing, new| existing.number == new.number,
                |id| Invoice {
                    id,
                    number: command.number,
                    provider_id: command.provider_id,
                    currency_id: command.currency_id,
                    amount_cents: command.amount_cents,
                    status: InvoiceStatus::Draft,
                    due_at: command.due_at,
                    issued_at: None,
                    created_at: now,
                    updated_at: now,
                },
            )
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>, AppError> {
        Ok(self.table.get(id).await)
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<Invoice>, AppError> {
        Ok(self.table.find(|i| i.number == number).await)
    }

    async fn list(
        &self,
        status: Option<InvoiceStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Invoice>, AppError> {
        Ok(self
            .table
            .select(|i| status.is_none_or(|s| i.status == s), offset, limit)
            .await)
    }

    async fn save(&self, invoice: Invoice) -> Result<Option<Invoice>, AppError> {
        Ok(self
            .table
            .update(invoice.id, |stored| {
                stored.amount_cents = invoice.amount_cents;
                stored.due_at = invoice.due_at;
                stored.status = invoice.status;
                stored.issued_at = invoice.issued_at;
                stored.updated_at = Utc::now();
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

    fn command(number: &str) -> CreateInvoiceCommand {
        CreateInvoiceCommand {
            number: number.to_string(),
            provider_id: 1,
            currency_id: 1,
            amount_cents: 500,
            due_at: None,
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let repo = InMemoryInvoiceRepository::new();
        let first = repo.create(command("INV-1")).await.unwrap();
        repo.create(command("INV-2")).await.unwrap();

        let mut issued = first.clone();
        issued.status = InvoiceStatus::Issued;
        repo.save(issued).await.unwrap();

        let drafts = repo
            .list(Some(InvoiceStatus::Draft), 0, 10)
            .await
            .unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].number, "INV-2");

        assert_eq!(repo.list(None, 0, 10).await.unwrap().len(), 2);
    }
}
