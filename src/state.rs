//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::api::dto::modules::ModuleInfo;
use crate::infrastructure::HealthProbe;
use crate::modules::erp::ErpService;
use crate::modules::finance::CurrencyService;
use crate::modules::invoicing::InvoiceService;
use crate::modules::notifications::NotificationService;
use crate::modules::providers::ProviderService;
use crate::modules::rbac::RoleService;
use crate::modules::relationships::RelationshipService;
use crate::modules::storage::FileService;
use crate::registry::EntityRegistry;

/// Services of every module plus the frozen registries.
///
/// Cloned per request; every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub role_service: Arc<RoleService>,
    pub currency_service: Arc<CurrencyService>,
    pub provider_service: Arc<ProviderService>,
    pub invoice_service: Arc<InvoiceService>,
    pub notification_service: Arc<NotificationService>,
    pub file_service: Arc<FileService>,
    pub erp_service: Arc<ErpService>,
    pub relationship_service: Arc<RelationshipService>,
    pub entities: Arc<EntityRegistry>,
    /// Mounted route groups, in mount order.
    pub modules: Arc<Vec<ModuleInfo>>,
    pub health_probe: Arc<dyn HealthProbe>,
}
