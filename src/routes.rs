//! Top-level router.
//!
//! # Route Structure
//!
//! - `GET /health`      - Storage and registry health (public)
//! - `GET /api/modules` - Mounted modules and registered entity names
//! - `/api{prefix}/*`   - One route group per module, in registration order
//!
//! Rate limiting and path normalization are applied by the server around this
//! router.

use axum::Router;
use axum::routing::get;

use crate::api::handlers::{health_handler, modules_handler};
use crate::api::middleware::tracing;
use crate::registry::ModuleRegistry;
use crate::state::AppState;

/// Builds the application router from the frozen module registry.
pub fn app_router(state: AppState, modules: &ModuleRegistry<Router<AppState>>) -> Router {
    let mut api = Router::new().route("/modules", get(modules_handler));

    for group in modules.get_routes() {
        let routes = group.routes().clone();
        api = if group.prefix() == "/" {
            api.merge(routes)
        } else {
            api.nest(group.prefix(), routes)
        };
    }

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .with_state(state)
        .layer(tracing::layer())
}
