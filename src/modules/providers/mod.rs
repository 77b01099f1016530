//! Providers module: suppliers invoiced through the invoicing module.

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

pub use application::{ProviderLoader, ProviderService};
pub use domain::{CreateProviderCommand, Provider, ProviderRepository, UpdateProviderCommand};
pub use errors::ProvidersError;

pub struct ProvidersModule;

impl Module for ProvidersModule {
    fn name(&self) -> &'static str {
        "providers"
    }

    fn prefix(&self) -> &'static str {
        "/providers"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["Providers"]
    }

    fn routes(&self) -> Router<AppState> {
        adapter::routes()
    }

    fn register_entities(
        &self,
        entities: &mut EntityRegistry,
        backends: &Backends,
    ) -> Result<(), RegistryError> {
        entities.register_entity::<Provider>(Arc::new(ProviderLoader::new(
            backends.providers.clone(),
        )))
    }
}
