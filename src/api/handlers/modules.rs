//! Handler for module introspection.

use axum::{Json, extract::State};

use crate::api::dto::modules::ModulesResponse;
use crate::state::AppState;

/// Lists mounted route groups and registered entity names.
///
/// # Endpoint
///
/// `GET /api/modules`
///
/// ```json
/// {
///   "modules": [{ "name": "rbac", "prefix": "/api/rbac", "tags": ["RBAC"] }],
///   "entities": ["currency", "file", "invoice"]
/// }
/// ```
pub async fn modules_handler(State(state): State<AppState>) -> Json<ModulesResponse> {
    Json(ModulesResponse {
        modules: state.modules.as_ref().clone(),
        entities: state
            .entities
            .names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}
