//! HTTP handlers for invoices.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use super::domain::{CreateInvoiceCommand, Invoice, InvoiceStatus, UpdateInvoiceCommand};
use crate::api::dto::pagination::{ListResponse, PaginationParams};
use crate::api::extract::{Path, Query, ValidatedJson};
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/invoices",
            get(list_invoices_handler).post(create_invoice_handler),
        )
        .route(
            "/invoices/{id}",
            get(get_invoice_handler)
                .patch(update_invoice_handler)
                .delete(delete_invoice_handler),
        )
}

#[derive(Debug, Default, Deserialize)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
}

/// Lists invoices.
///
/// # Endpoint
///
/// `GET /api/invoicing/invoices?status=issued&page=1&page_size=25`
pub async fn list_invoices_handler(
    State(state): State<AppState>,
    Query(filter): Query<InvoiceFilter>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ListResponse<Invoice>>, AppError> {
    let page = params.page_request()?;
    let items = state
        .invoice_service
        .list_invoices(filter.status, page.offset(), page.limit())
        .await?;

    Ok(Json(ListResponse::new(items, page)))
}

/// Creates a draft invoice.
///
/// # Endpoint
///
/// `POST /api/invoicing/invoices`
///
/// # Errors
///
/// Returns 404 if the provider or currency does not exist.
/// Returns 409 if the number is taken.
pub async fn create_invoice_handler(
    State(state): State<AppState>,
    ValidatedJson(command): ValidatedJson<CreateInvoiceCommand>,
) -> Result<(StatusCode, Json<Invoice>), AppError> {
    let invoice = state.invoice_service.create_invoice(command).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

pub async fn get_invoice_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Invoice>, AppError> {
    Ok(Json(state.invoice_service.get_invoice(id).await?))
}

/// Edits a draft or changes the invoice status.
///
/// # Endpoint
///
/// `PATCH /api/invoicing/invoices/{id}`
///
/// # Errors
///
/// Returns 409 `invoice_not_editable` when editing outside draft.
/// Returns 409 `invoice_invalid_transition` for a disallowed status change.
pub async fn update_invoice_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    ValidatedJson(command): ValidatedJson<UpdateInvoiceCommand>,
) -> Result<Json<Invoice>, AppError> {
    Ok(Json(state.invoice_service.update_invoice(id, command).await?))
}

pub async fn delete_invoice_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.invoice_service.delete_invoice(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
