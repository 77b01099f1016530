//! Business modules.
//!
//! Every module is a vertical slice with the same layers:
//!
//! - `adapter` - HTTP routes and handlers
//! - `application` - use cases (services) and the module's entity loader
//! - `domain` - entities, commands and repository ports
//! - `errors` - the module's error kinds
//! - `infrastructure` - PostgreSQL and in-memory repositories
//!
//! Modules never import each other. They plug into the application through
//! [`Module`]: routes go to the [`ModuleRegistry`](crate::registry::ModuleRegistry),
//! persisted types go to the [`EntityRegistry`]. Cross-module references
//! (an invoice's currency, a user's related records) are resolved by name
//! through the entity registry.

pub mod erp;
pub mod finance;
pub mod invoicing;
pub mod notifications;
pub mod providers;
pub mod rbac;
pub mod relationships;
pub mod storage;

use axum::Router;

use crate::config::Config;
use crate::infrastructure::Backends;
use crate::registry::{EntityRegistry, RegistryError};
use crate::state::AppState;

/// A business module contributing routes and, optionally, relatable entities.
pub trait Module: Send + Sync {
    /// Unique module name.
    fn name(&self) -> &'static str;

    /// Mount point under `/api`.
    fn prefix(&self) -> &'static str;

    /// Labels used for grouping in introspection output.
    fn tags(&self) -> &'static [&'static str];

    fn routes(&self) -> Router<AppState>;

    /// Binds the module's persisted types in the entity registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateEntityName`] if a name is already taken
    /// by another type.
    fn register_entities(
        &self,
        _entities: &mut EntityRegistry,
        _backends: &Backends,
    ) -> Result<(), RegistryError> {
        Ok(())
    }
}

/// Every module of the application, in mount order.
pub fn all(config: &Config) -> Vec<Box<dyn Module>> {
    vec![
        Box::new(rbac::RbacModule),
        Box::new(finance::FinanceModule),
        Box::new(providers::ProvidersModule),
        Box::new(invoicing::InvoicingModule),
        Box::new(notifications::NotificationsModule),
        Box::new(storage::StorageModule::new(config.max_upload_bytes)),
        Box::new(erp::ErpModule),
        Box::new(relationships::RelationshipsModule),
    ]
}
