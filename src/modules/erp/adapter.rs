//! HTTP handlers for ERP synchronization.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use super::domain::{ErpStatus, ErpSyncResult};
use crate::api::extract::Path;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sync/{entity_name}/{entity_id}", post(sync_handler))
        .route("/status", get(status_handler))
}

/// Pushes one record to the ERP.
///
/// # Endpoint
///
/// `POST /api/erp/sync/{entity_name}/{entity_id}`
///
/// # Errors
///
/// Returns 400 `unknown_entity_name`, 404 `erp_record_not_found`,
/// 502 when the ERP fails or rejects, 503 when no ERP is configured.
pub async fn sync_handler(
    Path((entity_name, entity_id)): Path<(String, i64)>,
    State(state): State<AppState>,
) -> Result<Json<ErpSyncResult>, AppError> {
    Ok(Json(state.erp_service.sync(&entity_name, entity_id).await?))
}

pub async fn status_handler(State(state): State<AppState>) -> Json<ErpStatus> {
    Json(state.erp_service.status().await)
}
