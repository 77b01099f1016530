//! RBAC error kinds.

use axum::http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;
use uuid::Uuid;

use crate::error::{ApiException, AppError};

#[derive(Debug, Error)]
pub enum RbacError {
    #[error("Role {id} not found")]
    RoleNotFound { id: i64 },

    #[error("Role '{name}' already exists")]
    RoleDuplicated { name: String },

    #[error("User {user_id} does not have role {role_id}")]
    RoleAssignmentNotFound { user_id: Uuid, role_id: i64 },
}

impl ApiException for RbacError {
    fn status(&self) -> StatusCode {
        match self {
            RbacError::RoleNotFound { .. } | RbacError::RoleAssignmentNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            RbacError::RoleDuplicated { .. } => StatusCode::CONFLICT,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            RbacError::RoleNotFound { .. } => "role_not_found",
            RbacError::RoleDuplicated { .. } => "role_duplicated",
            RbacError::RoleAssignmentNotFound { .. } => "role_assignment_not_found",
        }
    }

    fn details(&self) -> Value {
        match self {
            RbacError::RoleNotFound { id } => json!({ "id": id }),
            RbacError::RoleDuplicated { name } => json!({ "name": name }),
            RbacError::RoleAssignmentNotFound { user_id, role_id } => {
                json!({ "user_id": user_id, "role_id": role_id })
            }
        }
    }
}

impl From<RbacError> for AppError {
    fn from(e: RbacError) -> Self {
        AppError::exception(e)
    }
}
