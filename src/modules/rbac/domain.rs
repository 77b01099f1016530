//! Role entity, commands and repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::api::validation::non_blank;
use crate::error::AppError;
use crate::registry::Relatable;

/// Dotted permission names such as `invoices.read` or `files.*`.
static PERMISSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*(\.[a-z0-9_*]+)*$").expect("valid permission regex")
});

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Sorted, without duplicates.
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Relatable for Role {
    const ENTITY_NAME: &'static str = "role";
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct CreateRoleCommand {
    #[validate(length(min = 1, max = 100), custom(function = "non_blank"))]
    pub name: String,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_permissions"))]
    pub permissions: Vec<String>,
}

impl CreateRoleCommand {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            permissions: normalize_permissions(self.permissions),
        }
    }
}

/// Partial role update. `description: null` clears the description;
/// `permissions` replaces the whole set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct UpdateRoleCommand {
    #[validate(length(min = 1, max = 100), custom(function = "non_blank"))]
    pub name: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(max = 500))]
    pub description: Option<Option<String>>,

    #[validate(custom(function = "validate_permissions"))]
    pub permissions: Option<Vec<String>>,
}

impl UpdateRoleCommand {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(|n| n.trim().to_string()),
            description: self
                .description
                .map(|d| d.map(|d| d.trim().to_string()).filter(|d| !d.is_empty())),
            permissions: self.permissions.map(normalize_permissions),
        }
    }
}

/// Trims, sorts and deduplicates permission names.
pub fn normalize_permissions(permissions: Vec<String>) -> Vec<String> {
    let mut permissions: Vec<String> = permissions
        .into_iter()
        .map(|p| p.trim().to_string())
        .collect();
    permissions.sort_unstable();
    permissions.dedup();
    permissions
}

pub fn validate_permissions(permissions: &[String]) -> Result<(), ValidationError> {
    if permissions
        .iter()
        .all(|p| PERMISSION_REGEX.is_match(p.trim()))
    {
        Ok(())
    } else {
        Err(ValidationError::new("permission"))
    }
}

/// Repository interface for roles and user role assignments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn create(&self, command: CreateRoleCommand) -> Result<Role, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, AppError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AppError>;

    /// Roles ordered by name.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Role>, AppError>;

    async fn update(&self, id: i64, command: UpdateRoleCommand)
    -> Result<Option<Role>, AppError>;

    /// Deletes the role and every assignment of it.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Grants `role_id` to `user_id`. Granting twice is a no-op.
    async fn assign(&self, user_id: Uuid, role_id: i64) -> Result<(), AppError>;

    /// Returns whether the assignment existed.
    async fn unassign(&self, user_id: Uuid, role_id: i64) -> Result<bool, AppError>;

    /// Roles granted to `user_id`, ordered by name.
    async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<Role>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(permissions: &[&str]) -> CreateRoleCommand {
        CreateRoleCommand {
            name: "accountant".to_string(),
            description: None,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_permission_format() {
        assert!(command(&["invoices.read", "files.*", "admin"]).validate().is_ok());
        assert!(command(&["Invoices.read"]).validate().is_err());
        assert!(command(&["invoices..read"]).validate().is_err());
        assert!(command(&["1invoices"]).validate().is_err());
    }

    #[test]
    fn test_invalid_permission_reports_field() {
        let err = command(&["bad permission"]).validate().unwrap_err();
        assert!(err.field_errors().contains_key("permissions"));
    }

    #[test]
    fn test_permissions_are_sorted_and_deduplicated() {
        let normalized = command(&["b.read", " a.read", "b.read"]).normalized();
        assert_eq!(normalized.permissions, vec!["a.read", "b.read"]);
    }
}
