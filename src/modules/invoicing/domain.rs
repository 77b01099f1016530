//! Invoice entity, lifecycle and repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::api::validation::non_blank;
use crate::error::AppError;
use crate::registry::Relatable;

/// Invoice lifecycle.
///
/// ```text
/// draft -> issued -> paid
///   \        \
///    +--------+--> cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Issued => "issued",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    pub fn can_transition_to(self, next: InvoiceStatus) -> bool {
        use InvoiceStatus::*;
        matches!(
            (self, next),
            (Draft, Issued) | (Issued, Paid) | (Draft, Cancelled) | (Issued, Cancelled)
        )
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(InvoiceStatus::Draft),
            "issued" => Ok(InvoiceStatus::Issued),
            "paid" => Ok(InvoiceStatus::Paid),
            "cancelled" => Ok(InvoiceStatus::Cancelled),
            other => Err(format!("unknown invoice status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    pub id: i64,
    /// Unique.
    pub number: String,
    pub provider_id: i64,
    pub currency_id: i64,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
    pub due_at: Option<DateTime<Utc>>,
    /// Set when the invoice leaves draft.
    pub issued_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Relatable for Invoice {
    const ENTITY_NAME: &'static str = "invoice";
}

/// New invoices always start as drafts.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct CreateInvoiceCommand {
    #[validate(length(min = 1, max = 50), custom(function = "non_blank"))]
    pub number: String,

    #[validate(range(min = 1))]
    pub provider_id: i64,

    #[validate(range(min = 1))]
    pub currency_id: i64,

    #[validate(range(min = 0))]
    pub amount_cents: i64,

    pub due_at: Option<DateTime<Utc>>,
}

/// Partial invoice update.
///
/// `amount_cents` and `due_at` may only change while the invoice is a draft;
/// `status` drives the lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct UpdateInvoiceCommand {
    #[validate(range(min = 0))]
    pub amount_cents: Option<i64>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub due_at: Option<Option<DateTime<Utc>>>,

    pub status: Option<InvoiceStatus>,
}

impl UpdateInvoiceCommand {
    pub fn edits_content(&self) -> bool {
        self.amount_cents.is_some() || self.due_at.is_some()
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn create(&self, command: CreateInvoiceCommand) -> Result<Invoice, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>, AppError>;

    async fn find_by_number(&self, number: &str) -> Result<Option<Invoice>, AppError>;

    /// Invoices ordered by id, newest last, optionally filtered by status.
    async fn list(
        &self,
        status: Option<InvoiceStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Invoice>, AppError>;

    /// Writes the mutable fields of `invoice`: amount, due date, status and issue date.
    async fn save(&self, invoice: Invoice) -> Result<Option<Invoice>, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use InvoiceStatus::*;

    #[test]
    fn test_transitions() {
        assert!(Draft.can_transition_to(Issued));
        assert!(Issued.can_transition_to(Paid));
        assert!(Draft.can_transition_to(Cancelled));
        assert!(Issued.can_transition_to(Cancelled));

        assert!(!Draft.can_transition_to(Paid));
        assert!(!Paid.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Draft));
        assert!(!Issued.can_transition_to(Draft));
    }

    #[test]
    fn test_status_text_round_trip() {
        for status in [Draft, Issued, Paid, Cancelled] {
            assert_eq!(status.as_str().parse::<InvoiceStatus>(), Ok(status));
        }
        assert!("void".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let cmd = CreateInvoiceCommand {
            number: "INV-1".to_string(),
            provider_id: 1,
            currency_id: 1,
            amount_cents: -1,
            due_at: None,
        };
        let err = cmd.validate().unwrap_err();
        assert!(err.field_errors().contains_key("amount_cents"));
    }
}
