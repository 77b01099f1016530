//! HTTP handlers for file upload and download.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use super::domain::StoredFile;
use crate::api::extract::{Path, Query};
use crate::error::AppError;
use crate::state::AppState;

pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", post(upload_file_handler))
        .route("/{id}", get(get_file_handler).delete(delete_file_handler))
        .route("/{id}/content", get(file_content_handler))
        .route("/owners/{owner_id}", get(owner_files_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub owner_id: Uuid,
    pub file_name: String,
}

/// Uploads a file from the raw request body.
///
/// # Endpoint
///
/// `POST /api/files?owner_id={uuid}&file_name=report.pdf`
///
/// The request `Content-Type` is recorded with the file.
///
/// # Errors
///
/// Returns 400 `file_empty` or `file_name_invalid`.
/// Returns 413 if the body exceeds `MAX_UPLOAD_BYTES`.
pub async fn upload_file_handler(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<StoredFile>), AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let file = state
        .file_service
        .upload(query.owner_id, &query.file_name, content_type, body.to_vec())
        .await?;

    Ok((StatusCode::CREATED, Json(file)))
}

pub async fn get_file_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<StoredFile>, AppError> {
    Ok(Json(state.file_service.get(id).await?))
}

/// Streams the stored bytes back with the recorded content type.
///
/// # Endpoint
///
/// `GET /api/files/{id}/content`
pub async fn file_content_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let (file, bytes) = state.file_service.content(id).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        ascii_file_name(&file.file_name)
    );

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

pub async fn owner_files_handler(
    Path(owner_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredFile>>, AppError> {
    Ok(Json(state.file_service.list_for_owner(owner_id).await?))
}

pub async fn delete_file_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.file_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Header-safe rendition of a file name.
fn ascii_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
