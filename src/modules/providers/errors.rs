//! Provider error kinds.

use axum::http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;

use crate::error::{ApiException, AppError};

#[derive(Debug, Error)]
pub enum ProvidersError {
    #[error("Provider {id} not found")]
    ProviderNotFound { id: i64 },

    #[error("Provider with tax id '{tax_id}' already exists")]
    ProviderDuplicated { tax_id: String },
}

impl ApiException for ProvidersError {
    fn status(&self) -> StatusCode {
        match self {
            ProvidersError::ProviderNotFound { .. } => StatusCode::NOT_FOUND,
            ProvidersError::ProviderDuplicated { .. } => StatusCode::CONFLICT,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ProvidersError::ProviderNotFound { .. } => "provider_not_found",
            ProvidersError::ProviderDuplicated { .. } => "provider_duplicated",
        }
    }

    fn details(&self) -> Value {
        match self {
            ProvidersError::ProviderNotFound { id } => json!({ "id": id }),
            ProvidersError::ProviderDuplicated { tax_id } => json!({ "tax_id": tax_id }),
        }
    }
}

impl From<ProvidersError> for AppError {
    fn from(e: ProvidersError) -> Self {
        AppError::exception(e)
    }
}
