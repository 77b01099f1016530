//! Invoicing error kinds.

use axum::http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;

use super::domain::InvoiceStatus;
use crate::error::{ApiException, AppError};

#[derive(Debug, Error)]
pub enum InvoicingError {
    #[error("Invoice {id} not found")]
    InvoiceNotFound { id: i64 },

    #[error("Invoice number '{number}' already exists")]
    InvoiceDuplicated { number: String },

    #[error("Referenced {entity_name} {entity_id} not found")]
    InvoiceReferenceNotFound {
        entity_name: &'static str,
        entity_id: i64,
    },

    #[error("Invoice cannot move from {from} to {to}")]
    InvoiceInvalidTransition {
        from: InvoiceStatus,
        to: InvoiceStatus,
    },

    #[error("Invoice {id} is {status} and can no longer be changed")]
    InvoiceNotEditable { id: i64, status: InvoiceStatus },
}

impl ApiException for InvoicingError {
    fn status(&self) -> StatusCode {
        match self {
            InvoicingError::InvoiceNotFound { .. }
            | InvoicingError::InvoiceReferenceNotFound { .. } => StatusCode::NOT_FOUND,
            InvoicingError::InvoiceDuplicated { .. }
            | InvoicingError::InvoiceInvalidTransition { .. }
            | InvoicingError::InvoiceNotEditable { .. } => StatusCode::CONFLICT,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            InvoicingError::InvoiceNotFound { .. } => "invoice_not_found",
            InvoicingError::InvoiceDuplicated { .. } => "invoice_duplicated",
            InvoicingError::InvoiceReferenceNotFound { .. } => "invoice_reference_not_found",
            InvoicingError::InvoiceInvalidTransition { .. } => "invoice_invalid_transition",
            InvoicingError::InvoiceNotEditable { .. } => "invoice_not_editable",
        }
    }

    fn details(&self) -> Value {
        match self {
            InvoicingError::InvoiceNotFound { id } => json!({ "id": id }),
            InvoicingError::InvoiceDuplicated { number } => json!({ "number": number }),
            InvoicingError::InvoiceReferenceNotFound {
                entity_name,
                entity_id,
            } => json!({ "entity_name": entity_name, "entity_id": entity_id }),
            InvoicingError::InvoiceInvalidTransition { from, to } => {
                json!({ "from": from, "to": to })
            }
            InvoicingError::InvoiceNotEditable { id, status } => {
                json!({ "id": id, "status": status })
            }
        }
    }
}

impl From<InvoicingError> for AppError {
    fn from(e: InvoicingError) -> Self {
        AppError::exception(e)
    }
}
