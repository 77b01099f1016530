//! RBAC module: roles, their permissions and user role assignments.

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

pub use application::{RoleLoader, RoleService};
pub use domain::{CreateRoleCommand, Role, RoleRepository, UpdateRoleCommand};
pub use errors::RbacError;

pub struct RbacModule;

impl Module for RbacModule {
    fn name(&self) -> &'static str {
        "rbac"
    }

    fn prefix(&self) -> &'static str {
        "/rbac"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["RBAC", "Roles"]
    }

    fn routes(&self) -> Router<AppState> {
        adapter::routes()
    }

    fn register_entities(
        &self,
        entities: &mut EntityRegistry,
        backends: &Backends,
    ) -> Result<(), RegistryError> {
        entities.register_entity::<Role>(Arc::new(RoleLoader::new(backends.roles.clone())))
    }
}
