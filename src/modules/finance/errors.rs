//! Finance error kinds.

use axum::http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;

use crate::error::{ApiException, AppError};

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Currency {id} not found")]
    CurrencyNotFound { id: i64 },

    #[error("Currency with code '{code}' not found")]
    CurrencyCodeNotFound { code: String },

    #[error("Currency with {field} '{value}' already exists")]
    CurrencyDuplicated { field: &'static str, value: String },
}

impl ApiException for FinanceError {
    fn status(&self) -> StatusCode {
        match self {
            FinanceError::CurrencyNotFound { .. } | FinanceError::CurrencyCodeNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            FinanceError::CurrencyDuplicated { .. } => StatusCode::CONFLICT,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            FinanceError::CurrencyNotFound { .. } | FinanceError::CurrencyCodeNotFound { .. } => {
                "currency_not_found"
            }
            FinanceError::CurrencyDuplicated { .. } => "currency_duplicated",
        }
    }

    fn details(&self) -> Value {
        match self {
            FinanceError::CurrencyNotFound { id } => json!({ "id": id }),
            FinanceError::CurrencyCodeNotFound { code } => json!({ "code": code }),
            FinanceError::CurrencyDuplicated { field, value } => {
                json!({ "field": field, "value": value })
            }
        }
    }
}

impl From<FinanceError> for AppError {
    fn from(e: FinanceError) -> Self {
        AppError::exception(e)
    }
}
