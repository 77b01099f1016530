//! HTTP handlers for user relationships.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use super::domain::{CreateRelationshipCommand, Relationship, ResolvedRelationship};
use crate::api::extract::{Path, Query, ValidatedJson};
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_relationship_handler))
        .route("/users/{user_id}", get(user_relationships_handler))
        .route("/users/{user_id}/resolved", get(resolved_relationships_handler))
        .route(
            "/users/{user_id}/{entity_name}/{entity_id}",
            delete(delete_relationship_handler),
        )
}

#[derive(Debug, Default, Deserialize)]
pub struct RelationshipFilter {
    pub entity_name: Option<String>,
}

/// Links a user to a record of any registered entity.
///
/// # Endpoint
///
/// `POST /api/relationships`
///
/// # Errors
///
/// Returns 400 `unknown_entity_name` for unregistered names.
/// Returns 404 if the target record does not exist.
/// Returns 409 if the link already exists.
pub async fn create_relationship_handler(
    State(state): State<AppState>,
    ValidatedJson(command): ValidatedJson<CreateRelationshipCommand>,
) -> Result<(StatusCode, Json<Relationship>), AppError> {
    let relationship = state.relationship_service.create(command).await?;
    Ok((StatusCode::CREATED, Json(relationship)))
}

pub async fn user_relationships_handler(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
    Query(filter): Query<RelationshipFilter>,
) -> Result<Json<Vec<Relationship>>, AppError> {
    Ok(Json(
        state
            .relationship_service
            .list(user_id, filter.entity_name)
            .await?,
    ))
}

/// Links with their records, `record: null` for deleted targets.
///
/// # Endpoint
///
/// `GET /api/relationships/users/{user_id}/resolved`
pub async fn resolved_relationships_handler(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ResolvedRelationship>>, AppError> {
    Ok(Json(state.relationship_service.resolved(user_id).await?))
}

pub async fn delete_relationship_handler(
    Path((user_id, entity_name, entity_id)): Path<(Uuid, String, i64)>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state
        .relationship_service
        .delete(user_id, &entity_name, entity_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
