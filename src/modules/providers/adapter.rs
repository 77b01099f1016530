//! HTTP handlers for providers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use super::domain::{CreateProviderCommand, Provider, UpdateProviderCommand};
use crate::api::dto::pagination::{ListResponse, PaginationParams};
use crate::api::extract::{Path, Query, ValidatedJson};
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_providers_handler).post(create_provider_handler))
        .route(
            "/{id}",
            get(get_provider_handler)
                .patch(update_provider_handler)
                .delete(delete_provider_handler),
        )
}

pub async fn list_providers_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ListResponse<Provider>>, AppError> {
    let page = params.page_request()?;
    let items = state
        .provider_service
        .list_providers(page.offset(), page.limit())
        .await?;

    Ok(Json(ListResponse::new(items, page)))
}

/// Creates a provider.
///
/// # Endpoint
///
/// `POST /api/providers`
///
/// # Errors
///
/// Returns 409 if the tax id is taken.
pub async fn create_provider_handler(
    State(state): State<AppState>,
    ValidatedJson(command): ValidatedJson<CreateProviderCommand>,
) -> Result<(StatusCode, Json<Provider>), AppError> {
    let provider = state.provider_service.create_provider(command).await?;
    Ok((StatusCode::CREATED, Json(provider)))
}

pub async fn get_provider_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Provider>, AppError> {
    Ok(Json(state.provider_service.get_provider(id).await?))
}

pub async fn update_provider_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    ValidatedJson(command): ValidatedJson<UpdateProviderCommand>,
) -> Result<Json<Provider>, AppError> {
    Ok(Json(state.provider_service.update_provider(id, command).await?))
}

pub async fn delete_provider_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.provider_service.delete_provider(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
