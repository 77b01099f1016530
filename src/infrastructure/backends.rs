//! Storage adapters for every module, assembled for one backend.

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::PgPool;

use super::database::PgHealthProbe;
use super::health::{HealthProbe, MemoryHealthProbe};
use crate::modules::erp::{DisabledErpGateway, ErpGateway};
use crate::modules::finance::CurrencyRepository;
use crate::modules::finance::infrastructure::{InMemoryCurrencyRepository, PgCurrencyRepository};
use crate::modules::invoicing::InvoiceRepository;
use crate::modules::invoicing::infrastructure::{InMemoryInvoiceRepository, PgInvoiceRepository};
use crate::modules::notifications::NotificationRepository;
use crate::modules::notifications::infrastructure::{
    InMemoryNotificationRepository, PgNotificationRepository,
};
use crate::modules::providers::ProviderRepository;
use crate::modules::providers::infrastructure::{InMemoryProviderRepository, PgProviderRepository};
use crate::modules::rbac::RoleRepository;
use crate::modules::rbac::infrastructure::{InMemoryRoleRepository, PgRoleRepository};
use crate::modules::relationships::RelationshipRepository;
use crate::modules::relationships::infrastructure::{
    InMemoryRelationshipRepository, PgRelationshipRepository,
};
use crate::modules::storage::infrastructure::{
    InMemoryFileRepository, LocalBlobStore, MemoryBlobStore, PgFileRepository,
};
use crate::modules::storage::{BlobStore, FileRepository};

/// Every port implementation the modules need.
///
/// Built once at startup; loaders registered in the entity registry and the
/// services share the same repository instances.
#[derive(Clone)]
pub struct Backends {
    pub roles: Arc<dyn RoleRepository>,
    pub currencies: Arc<dyn CurrencyRepository>,
    pub providers: Arc<dyn ProviderRepository>,
    pub invoices: Arc<dyn InvoiceRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub files: Arc<dyn FileRepository>,
    pub blobs: Arc<dyn BlobStore>,
    pub relationships: Arc<dyn RelationshipRepository>,
    pub erp: Arc<dyn ErpGateway>,
    pub health: Arc<dyn HealthProbe>,
}

impl Backends {
    /// PostgreSQL repositories with file content under `file_storage_dir`.
    pub fn postgres(pool: Arc<PgPool>, file_storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            roles: Arc::new(PgRoleRepository::new(pool.clone())),
            currencies: Arc::new(PgCurrencyRepository::new(pool.clone())),
            providers: Arc::new(PgProviderRepository::new(pool.clone())),
            invoices: Arc::new(PgInvoiceRepository::new(pool.clone())),
            notifications: Arc::new(PgNotificationRepository::new(pool.clone())),
            files: Arc::new(PgFileRepository::new(pool.clone())),
            blobs: Arc::new(LocalBlobStore::new(file_storage_dir)),
            relationships: Arc::new(PgRelationshipRepository::new(pool.clone())),
            erp: Arc::new(DisabledErpGateway),
            health: Arc::new(PgHealthProbe::new(pool)),
        }
    }

    /// Process-local storage. Data is lost on exit.
    pub fn in_memory() -> Self {
        Self {
            roles: Arc::new(InMemoryRoleRepository::new()),
            currencies: Arc::new(InMemoryCurrencyRepository::new()),
            providers: Arc::new(InMemoryProviderRepository::new()),
            invoices: Arc::new(InMemoryInvoiceRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
            files: Arc::new(InMemoryFileRepository::new()),
            blobs: Arc::new(MemoryBlobStore::new()),
            relationships: Arc::new(InMemoryRelationshipRepository::new()),
            erp: Arc::new(DisabledErpGateway),
            health: Arc::new(MemoryHealthProbe),
        }
    }
}
