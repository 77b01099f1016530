//! Explicit application assembly.
//!
//! Startup runs in a fixed order:
//!
//! 1. every module binds its entity names in the [`EntityRegistry`]
//! 2. the registry is frozen behind an `Arc` and handed to the services
//! 3. every module registers its route group in the [`ModuleRegistry`]
//! 4. the module catalog and [`AppState`] are built from the frozen registries
//!
//! Any registry conflict aborts startup.

use axum::Router;
use std::sync::Arc;

use crate::api::dto::modules::ModuleInfo;
use crate::config::Config;
use crate::infrastructure::Backends;
use crate::modules::{self, Module};
use crate::modules::erp::ErpService;
use crate::modules::finance::CurrencyService;
use crate::modules::invoicing::InvoiceService;
use crate::modules::notifications::NotificationService;
use crate::modules::providers::ProviderService;
use crate::modules::rbac::RoleService;
use crate::modules::relationships::RelationshipService;
use crate::modules::storage::FileService;
use crate::registry::{EntityRegistry, ModuleRegistry, RegistryError};
use crate::routes::app_router;
use crate::state::AppState;

/// Result of a successful startup: the state and the route groups to mount.
pub struct Bootstrapped {
    pub state: AppState,
    pub modules: ModuleRegistry<Router<AppState>>,
}

impl Bootstrapped {
    /// Builds the application router.
    pub fn into_router(self) -> Router {
        app_router(self.state, &self.modules)
    }
}

/// Assembles every module of the application over `backends`.
///
/// # Errors
///
/// Returns a [`RegistryError`] if two modules share a name or bind the same
/// entity name to different types.
pub fn init(config: &Config, backends: Backends) -> Result<Bootstrapped, RegistryError> {
    init_with(&modules::all(config), config, backends)
}

/// Like [`init`], over an explicit module list.
pub fn init_with(
    modules: &[Box<dyn Module>],
    config: &Config,
    backends: Backends,
) -> Result<Bootstrapped, RegistryError> {
    let mut entities = EntityRegistry::new();
    for module in modules {
        module.register_entities(&mut entities, &backends)?;
    }
    let entities = Arc::new(entities);
    tracing::info!(entities = ?entities.names(), "entity registry frozen");

    let services = Services::build(&backends, entities.clone(), config);

    let mut registry = ModuleRegistry::new();
    for module in modules {
        registry.register(
            module.name(),
            module.routes(),
            module.prefix(),
            module.tags().iter().copied(),
        )?;
        tracing::info!(module = module.name(), prefix = module.prefix(), "module registered");
    }

    let catalog: Vec<ModuleInfo> = registry.get_routes().iter().map(ModuleInfo::from).collect();

    let state = AppState {
        role_service: services.roles,
        currency_service: services.currencies,
        provider_service: services.providers,
        invoice_service: services.invoices,
        notification_service: services.notifications,
        file_service: services.files,
        erp_service: services.erp,
        relationship_service: services.relationships,
        entities,
        modules: Arc::new(catalog),
        health_probe: backends.health.clone(),
    };

    Ok(Bootstrapped {
        state,
        modules: registry,
    })
}

struct Services {
    roles: Arc<RoleService>,
    currencies: Arc<CurrencyService>,
    providers: Arc<ProviderService>,
    invoices: Arc<InvoiceService>,
    notifications: Arc<NotificationService>,
    files: Arc<FileService>,
    erp: Arc<ErpService>,
    relationships: Arc<RelationshipService>,
}

impl Services {
    fn build(backends: &Backends, entities: Arc<EntityRegistry>, config: &Config) -> Self {
        Self {
            roles: Arc::new(RoleService::new(backends.roles.clone())),
            currencies: Arc::new(CurrencyService::new(backends.currencies.clone())),
            providers: Arc::new(ProviderService::new(backends.providers.clone())),
            invoices: Arc::new(InvoiceService::new(
                backends.invoices.clone(),
                entities.clone(),
            )),
            notifications: Arc::new(NotificationService::new(backends.notifications.clone())),
            files: Arc::new(FileService::new(
                backends.files.clone(),
                backends.blobs.clone(),
            )),
            erp: Arc::new(ErpService::new(
                backends.erp.clone(),
                entities.clone(),
                config.erp_retry_attempts,
            )),
            relationships: Arc::new(RelationshipService::new(
                backends.relationships.clone(),
                entities,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::finance::FinanceModule;
    use crate::state::AppState;

    struct Impostor;

    impl Module for Impostor {
        fn name(&self) -> &'static str {
            "finance"
        }

        fn prefix(&self) -> &'static str {
            "/billing"
        }

        fn tags(&self) -> &'static [&'static str] {
            &[]
        }

        fn routes(&self) -> Router<AppState> {
            Router::new()
        }
    }

    #[test]
    fn test_default_modules_in_order() {
        let booted = init(&Config::default(), Backends::in_memory()).unwrap();

        let names: Vec<&str> = booted
            .state
            .modules
            .iter()
            .map(|m| m.name.as_str())
            .collect();

        assert_eq!(
            names,
            vec![
                "rbac",
                "finance",
                "providers",
                "invoicing",
                "notifications",
                "storage",
                "erp",
                "relationships"
            ]
        );
        assert_eq!(
            booted.state.entities.names(),
            vec!["currency", "file", "invoice", "notification", "provider", "role"]
        );
    }

    #[test]
    fn test_duplicate_module_name_aborts() {
        let modules: Vec<Box<dyn Module>> = vec![Box::new(FinanceModule), Box::new(Impostor)];

        let err = init_with(&modules, &Config::default(), Backends::in_memory())
            .err()
            .unwrap();

        assert_eq!(
            err,
            RegistryError::DuplicateModule {
                name: "finance".to_string()
            }
        );
    }
}
