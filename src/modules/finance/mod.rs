//! Finance module: currencies.

pub mod adapter;
pub mod application;
pub mod domain;
pub mod errors;
pub mod infrastructure;

use axum::Router;
use std::sync::Arc;

use crate::infrastructure::Backends;
use crate::modules::Module;
use crate::registry::{EntityRegistry, RegistryError};
use crate::state::AppState;

pub use application::{CurrencyLoader, CurrencyService};
pub use domain::{CreateCurrencyCommand, Currency, CurrencyRepository, UpdateCurrencyCommand};
pub use errors::FinanceError;

pub struct FinanceModule;

impl Module for FinanceModule {
    fn name(&self) -> &'static str {
        "finance"
    }

    fn prefix(&self) -> &'static str {
        "/finance"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["Finance", "Currency"]
    }

    fn routes(&self) -> Router<AppState> {
        adapter::routes()
    }

    fn register_entities(
        &self,
        entities: &mut EntityRegistry,
        backends: &Backends,
    ) -> Result<(), RegistryError> {
        entities.register_entity::<Currency>(Arc::new(CurrencyLoader::new(
            backends.currencies.clone(),
        )))
    }
}
