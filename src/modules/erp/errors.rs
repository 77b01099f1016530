//! ERP error kinds.

use axum::http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;

use crate::error::{ApiException, AppError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErpError {
    #[error("ERP integration is not configured")]
    NotConfigured,

    /// Network failure or 5xx from the ERP. Retried.
    #[error("ERP is unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("ERP rejected the record: {reason}")]
    Rejected { reason: String },

    #[error("{entity_name} {entity_id} not found")]
    RecordNotFound { entity_name: String, entity_id: i64 },
}

impl ErpError {
    pub fn is_transient(&self) -> bool {
        matches!(self, ErpError::Unavailable { .. })
    }
}

impl ApiException for ErpError {
    fn status(&self) -> StatusCode {
        match self {
            ErpError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ErpError::Unavailable { .. } | ErpError::Rejected { .. } => StatusCode::BAD_GATEWAY,
            ErpError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ErpError::NotConfigured => "erp_not_configured",
            ErpError::Unavailable { .. } => "external_service_error",
            ErpError::Rejected { .. } => "erp_rejected",
            ErpError::RecordNotFound { .. } => "erp_record_not_found",
        }
    }

    fn details(&self) -> Value {
        match self {
            ErpError::NotConfigured => json!({}),
            ErpError::Unavailable { reason } | ErpError::Rejected { reason } => {
                json!({ "service": "erp", "reason": reason })
            }
            ErpError::RecordNotFound {
                entity_name,
                entity_id,
            } => json!({ "entity_name": entity_name, "entity_id": entity_id }),
        }
    }
}

impl From<ErpError> for AppError {
    fn from(e: ErpError) -> Self {
        AppError::exception(e)
    }
}
