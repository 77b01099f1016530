//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: Storage backend probe
/// 2. **Modules**: At least one route group is mounted
/// 3. **Entities**: Entity registry is populated
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = match state.health_probe.ping().await {
        Ok(()) => CheckStatus::ok(format!("Connected ({})", state.health_probe.backend())),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    };

    let modules = if state.modules.is_empty() {
        CheckStatus::error("No modules mounted")
    } else {
        CheckStatus::ok(format!("{} modules mounted", state.modules.len()))
    };

    let entities = if state.entities.is_empty() {
        CheckStatus::error("Entity registry is empty")
    } else {
        CheckStatus::ok(format!("{} entities registered", state.entities.len()))
    };

    let all_healthy = database.is_ok() && modules.is_ok() && entities.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database,
            modules,
            entities,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
