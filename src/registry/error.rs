//! Registry failures.

use axum::http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;

use crate::error::{ApiException, AppError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two modules tried to register under the same name. Fatal at startup.
    #[error("Module '{name}' is already registered")]
    DuplicateModule { name: String },

    /// An entity name is already bound to another type. Fatal at startup.
    #[error("Entity name '{name}' is already bound to {existing}, cannot rebind it to {attempted}")]
    DuplicateEntityName {
        name: String,
        existing: &'static str,
        attempted: &'static str,
    },

    /// Lookup of a name nobody registered.
    #[error("Unknown entity name '{name}'")]
    UnknownEntityName { name: String },
}

impl ApiException for RegistryError {
    fn status(&self) -> StatusCode {
        match self {
            RegistryError::UnknownEntityName { .. } => StatusCode::BAD_REQUEST,
            RegistryError::DuplicateModule { .. } | RegistryError::DuplicateEntityName { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            RegistryError::DuplicateModule { .. } => "duplicate_module",
            RegistryError::DuplicateEntityName { .. } => "duplicate_entity_name",
            RegistryError::UnknownEntityName { .. } => "unknown_entity_name",
        }
    }

    fn details(&self) -> Value {
        match self {
            RegistryError::DuplicateModule { name } => json!({ "module": name }),
            RegistryError::DuplicateEntityName { name, .. }
            | RegistryError::UnknownEntityName { name } => json!({ "entity_name": name }),
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        AppError::exception(e)
    }
}
