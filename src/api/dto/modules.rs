//! DTOs for the module introspection endpoint.

use axum::Router;
use serde::Serialize;

use crate::registry::RouteGroup;
use crate::state::AppState;

/// Public description of one mounted route group.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ModuleInfo {
    pub name: String,
    /// Full mount path, e.g. `/api/finance`.
    pub prefix: String,
    pub tags: Vec<String>,
}

impl From<&RouteGroup<Router<AppState>>> for ModuleInfo {
    fn from(group: &RouteGroup<Router<AppState>>) -> Self {
        Self {
            name: group.module_name().to_string(),
            prefix: format!("/api{}", group.prefix()),
            tags: group.tags().iter().cloned().collect(),
        }
    }
}

/// Response of `GET /api/modules`.
#[derive(Debug, Serialize)]
pub struct ModulesResponse {
    /// In mount order.
    pub modules: Vec<ModuleInfo>,
    /// Sorted.
    pub entities: Vec<String>,
}
