//! Currency entity, commands and repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

use crate::api::validation::non_blank;
use crate::error::AppError;
use crate::registry::Relatable;

/// ISO 4217 alphabetic code, any case before normalization.
static CURRENCY_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{3}$").expect("valid currency code regex"));

/// Largest id a client may choose. Keeps the serial sequence usable after an
/// explicit insert.
pub const MAX_EXPLICIT_ID: i64 = i32::MAX as i64;

/// A currency known to the finance module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Currency {
    pub id: i64,
    pub name: String,
    /// Upper-case ISO 4217 code, unique.
    pub code: String,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Relatable for Currency {
    const ENTITY_NAME: &'static str = "currency";
}

/// Request body for `POST /api/finance/currencies`.
///
/// `id` is optional; when absent the store assigns one. Explicit ids are
/// capped at [`MAX_EXPLICIT_ID`].
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct CreateCurrencyCommand {
    #[validate(range(min = 1, max = MAX_EXPLICIT_ID))]
    pub id: Option<i64>,

    #[validate(length(min = 1, max = 100), custom(function = "non_blank"))]
    pub name: String,

    #[validate(custom(function = "validate_currency_code"))]
    pub code: String,

    #[validate(length(min = 2, max = 100))]
    pub country: Option<String>,
}

impl CreateCurrencyCommand {
    /// Trims text fields, upper-cases the code and drops a blank country.
    pub fn normalized(self) -> Self {
        Self {
            id: self.id,
            name: self.name.trim().to_string(),
            code: self.code.trim().to_ascii_uppercase(),
            country: normalize_optional(self.country),
        }
    }
}

/// Request body for `PATCH /api/finance/currencies/{id}`.
///
/// The code is immutable. `country: null` clears the country.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct UpdateCurrencyCommand {
    #[validate(length(min = 1, max = 100), custom(function = "non_blank"))]
    pub name: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(min = 2, max = 100))]
    pub country: Option<Option<String>>,
}

impl UpdateCurrencyCommand {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(|n| n.trim().to_string()),
            country: self.country.map(normalize_optional),
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate_currency_code(code: &str) -> Result<(), ValidationError> {
    if CURRENCY_CODE_REGEX.is_match(code.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("currency_code"))
    }
}

/// Repository interface for currencies.
///
/// # Implementations
///
/// - [`super::infrastructure::PgCurrencyRepository`] - PostgreSQL implementation
/// - [`super::infrastructure::InMemoryCurrencyRepository`] - memory backend
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrencyRepository: Send + Sync {
    /// Stores a normalized currency.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code or explicit id is taken.
    async fn create(&self, command: CreateCurrencyCommand) -> Result<Currency, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Currency>, AppError>;

    /// Looks up by upper-case code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Currency>, AppError>;

    /// Currencies ordered by code.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Currency>, AppError>;

    /// Returns `None` if no currency has `id`.
    async fn update(
        &self,
        id: i64,
        command: UpdateCurrencyCommand,
    ) -> Result<Option<Currency>, AppError>;

    /// Returns whether a row was deleted.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
