//! HTTP handlers for currencies.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use super::domain::{CreateCurrencyCommand, Currency, UpdateCurrencyCommand};
use crate::api::dto::pagination::{ListResponse, PaginationParams};
use crate::api::extract::{Path, Query, ValidatedJson};
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/currencies",
            get(list_currencies_handler).post(create_currency_handler),
        )
        .route("/currencies/code/{code}", get(get_currency_by_code_handler))
        .route(
            "/currencies/{id}",
            get(get_currency_handler)
                .patch(update_currency_handler)
                .delete(delete_currency_handler),
        )
}

/// Lists currencies ordered by code.
///
/// # Endpoint
///
/// `GET /api/finance/currencies?page=1&page_size=25`
pub async fn list_currencies_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ListResponse<Currency>>, AppError> {
    let page = params.page_request()?;
    let items = state
        .currency_service
        .list_currencies(page.offset(), page.limit())
        .await?;

    Ok(Json(ListResponse::new(items, page)))
}

/// Creates a currency.
///
/// # Endpoint
///
/// `POST /api/finance/currencies`
///
/// # Errors
///
/// Returns 400 with per-field codes if the body fails validation.
/// Returns 409 if the code or explicit id is taken.
pub async fn create_currency_handler(
    State(state): State<AppState>,
    ValidatedJson(command): ValidatedJson<CreateCurrencyCommand>,
) -> Result<(StatusCode, Json<Currency>), AppError> {
    let currency = state.currency_service.create_currency(command).await?;
    Ok((StatusCode::CREATED, Json(currency)))
}

pub async fn get_currency_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Currency>, AppError> {
    Ok(Json(state.currency_service.get_currency(id).await?))
}

/// `GET /api/finance/currencies/code/{code}`, case-insensitive.
pub async fn get_currency_by_code_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Currency>, AppError> {
    Ok(Json(state.currency_service.get_currency_by_code(&code).await?))
}

/// Partially updates a currency.
///
/// # Endpoint
///
/// `PATCH /api/finance/currencies/{id}`
///
/// `country: null` clears the country.
pub async fn update_currency_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    ValidatedJson(command): ValidatedJson<UpdateCurrencyCommand>,
) -> Result<Json<Currency>, AppError> {
    Ok(Json(state.currency_service.update_currency(id, command).await?))
}

pub async fn delete_currency_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.currency_service.delete_currency(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
