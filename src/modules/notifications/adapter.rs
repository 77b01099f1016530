//! HTTP handlers for notifications.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use super::domain::{CreateNotificationCommand, Notification};
use crate::api::extract::{Path, Query, ValidatedJson};
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_notification_handler))
        .route("/users/{user_id}", get(user_notifications_handler))
        .route("/{id}/read", post(mark_read_handler))
        .route("/{id}", delete(delete_notification_handler))
}

#[derive(Debug, Default, Deserialize)]
pub struct InboxQuery {
    #[serde(default)]
    pub unread_only: bool,
}

pub async fn create_notification_handler(
    State(state): State<AppState>,
    ValidatedJson(command): ValidatedJson<CreateNotificationCommand>,
) -> Result<(StatusCode, Json<Notification>), AppError> {
    let notification = state.notification_service.notify(command).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// A user's notifications, newest first.
///
/// # Endpoint
///
/// `GET /api/notifications/users/{user_id}?unread_only=true`
pub async fn user_notifications_handler(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
    Query(query): Query<InboxQuery>,
) -> Result<Json<Vec<Notification>>, AppError> {
    Ok(Json(
        state
            .notification_service
            .list_for_user(user_id, query.unread_only)
            .await?,
    ))
}

/// `POST /api/notifications/{id}/read`. Idempotent.
pub async fn mark_read_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Notification>, AppError> {
    Ok(Json(state.notification_service.mark_read(id).await?))
}

pub async fn delete_notification_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.notification_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
