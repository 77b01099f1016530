//! Invoicing module: provider invoices in a currency.
//!
//! Invoices reference providers and currencies by id. Those references are
//! checked through the [`EntityRegistry`] under the `provider` and `currency`
//! names, so this module does not depend on the modules that own them.

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

pub use application::{InvoiceLoader, InvoiceService};
pub use domain::{
    CreateInvoiceCommand, Invoice, InvoiceRepository, InvoiceStatus, UpdateInvoiceCommand,
};
pub use errors::InvoicingError;

pub struct InvoicingModule;

impl Module for InvoicingModule {
    fn name(&self) -> &'static str {
        "invoicing"
    }

    fn prefix(&self) -> &'static str {
        "/invoicing"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["Invoicing"]
    }

    fn routes(&self) -> Router<AppState> {
        adapter::routes()
    }

    fn register_entities(
        &self,
        entities: &mut EntityRegistry,
        backends: &Backends,
    ) -> Result<(), RegistryError> {
        entities.register_entity::<Invoice>(Arc::new(InvoiceLoader::new(
            backends.invoices.clone(),
        )))
    }
}
