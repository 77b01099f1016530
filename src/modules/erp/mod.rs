//! ERP integration module: pushes registered entities to an external ERP.
//!
//! Records are looked up by entity name through the [`EntityRegistry`], so any
//! module's relatable type can be synchronized.
//!
//! [`EntityRegistry`]: crate::registry::EntityRegistry

pub mod adapter;
pub mod application;
pub mod domain;
pub mod errors;
pub mod infrastructure;

use axum::Router;

use crate::modules::Module;
use crate::state::AppState;

pub use application::ErpService;
pub use domain::{ErpGateway, ErpReceipt, ErpRecord, ErpStatus, ErpSyncResult};
pub use errors::ErpError;
pub use infrastructure::DisabledErpGateway;

pub struct ErpModule;

impl Module for ErpModule {
    fn name(&self) -> &'static str {
        "erp"
    }

    fn prefix(&self) -> &'static str {
        "/erp"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["ERP", "Integration"]
    }

    fn routes(&self) -> Router<AppState> {
        adapter::routes()
    }
}
