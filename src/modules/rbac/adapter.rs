//! HTTP handlers for roles and user role assignments.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, put},
};
use uuid::Uuid;

use super::domain::{CreateRoleCommand, Role, UpdateRoleCommand};
use crate::api::dto::pagination::{ListResponse, PaginationParams};
use crate::api::extract::{Path, Query, ValidatedJson};
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/roles", get(list_roles_handler).post(create_role_handler))
        .route(
            "/roles/{id}",
            get(get_role_handler)
                .patch(update_role_handler)
                .delete(delete_role_handler),
        )
        .route(
            "/users/{user_id}/roles/{role_id}",
            put(assign_role_handler).delete(unassign_role_handler),
        )
        .route("/users/{user_id}/roles", get(user_roles_handler))
        .route("/users/{user_id}/permissions", get(user_permissions_handler))
}

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ListResponse<Role>>, AppError> {
    let page = params.page_request()?;
    let items = state
        .role_service
        .list_roles(page.offset(), page.limit())
        .await?;

    Ok(Json(ListResponse::new(items, page)))
}

/// Creates a role.
///
/// # Endpoint
///
/// `POST /api/rbac/roles`
///
/// # Errors
///
/// Returns 400 if a permission is malformed.
/// Returns 409 if the name is taken.
pub async fn create_role_handler(
    State(state): State<AppState>,
    ValidatedJson(command): ValidatedJson<CreateRoleCommand>,
) -> Result<(StatusCode, Json<Role>), AppError> {
    let role = state.role_service.create_role(command).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

pub async fn get_role_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Role>, AppError> {
    Ok(Json(state.role_service.get_role(id).await?))
}

pub async fn update_role_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    ValidatedJson(command): ValidatedJson<UpdateRoleCommand>,
) -> Result<Json<Role>, AppError> {
    Ok(Json(state.role_service.update_role(id, command).await?))
}

pub async fn delete_role_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.role_service.delete_role(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /api/rbac/users/{user_id}/roles/{role_id}`. Idempotent.
pub async fn assign_role_handler(
    Path((user_id, role_id)): Path<(Uuid, i64)>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.role_service.assign_role(user_id, role_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unassign_role_handler(
    Path((user_id, role_id)): Path<(Uuid, i64)>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.role_service.unassign_role(user_id, role_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn user_roles_handler(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Role>>, AppError> {
    Ok(Json(state.role_service.user_roles(user_id).await?))
}

/// Sorted, deduplicated permissions of every role the user holds.
///
/// # Endpoint
///
/// `GET /api/rbac/users/{user_id}/permissions`
pub async fn user_permissions_handler(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.role_service.user_permissions(user_id).await?))
}
