//! Provider entity, commands and repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::validation::non_blank;
use crate::error::AppError;
use crate::registry::Relatable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provider {
    pub id: i64,
    pub name: String,
    /// Unique.
    pub tax_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Relatable for Provider {
    const ENTITY_NAME: &'static str = "provider";
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct CreateProviderCommand {
    #[validate(length(min = 1, max = 200), custom(function = "non_blank"))]
    pub name: String,

    #[validate(length(min = 1, max = 50), custom(function = "non_blank"))]
    pub tax_id: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 3, max = 50))]
    pub phone: Option<String>,
}

impl CreateProviderCommand {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            tax_id: self.tax_id.trim().to_string(),
            email: self.email.map(|e| e.trim().to_ascii_lowercase()),
            phone: self.phone.map(|p| p.trim().to_string()),
        }
    }
}

/// Partial provider update. The tax id is immutable; `null` clears email or phone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct UpdateProviderCommand {
    #[validate(length(min = 1, max = 200), custom(function = "non_blank"))]
    pub name: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(email)]
    pub email: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(min = 3, max = 50))]
    pub phone: Option<Option<String>>,
}

impl UpdateProviderCommand {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(|n| n.trim().to_string()),
            email: self.email.map(|e| e.map(|e| e.trim().to_ascii_lowercase())),
            phone: self.phone.map(|p| p.map(|p| p.trim().to_string())),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderRepository: Send + Sync {
    async fn create(&self, command: CreateProviderCommand) -> Result<Provider, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Provider>, AppError>;

    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Provider>, AppError>;

    /// Providers ordered by name.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Provider>, AppError>;

    async fn update(
        &self,
        id: i64,
        command: UpdateProviderCommand,
    ) -> Result<Option<Provider>, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        let mut cmd = CreateProviderCommand {
            name: "Acme".to_string(),
            tax_id: "B-123".to_string(),
            email: Some("billing@acme.test".to_string()),
            phone: None,
        };
        assert!(cmd.validate().is_ok());

        cmd.email = Some("not-an-email".to_string());
        let err = cmd.validate().unwrap_err();
        assert!(err.field_errors().contains_key("email"));
    }

    #[test]
    fn test_update_email_null_clears() {
        let cmd: UpdateProviderCommand = serde_json::from_str(r#"{"email": null}"#).unwrap();
        assert_eq!(cmd.email, Some(None));
        assert_eq!(cmd.phone, None);
        assert!(cmd.validate().is_ok());
    }
}
