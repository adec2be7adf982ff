//! Handlers for mapping management endpoints (list, delete).

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::links::{DeleteResponse, UrlMappingResponse};
use crate::api::dto::pagination::ListParams;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes a short link.
///
/// # Endpoint
///
/// `DELETE /{short_id}`
///
/// # Response
///
/// ```json
/// { "message": "Short URL deleted successfully" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short ID doesn't exist.
pub async fn delete_link_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.link_service.delete(&short_id).await?;

    Ok(Json(DeleteResponse::deleted()))
}

/// Lists mappings, newest first.
///
/// # Endpoint
///
/// `GET /list?page=1&limit=20`
///
/// Invalid paging values fall back to the defaults; `limit` is capped at 100.
pub async fn list_links_handler(
    Query(params): Query<ListParams>,
    State(state): State<AppState>,
) -> Result<Json<Vec<UrlMappingResponse>>, AppError> {
    let mappings = state.link_service.list(params.page_request()).await?;

    Ok(Json(
        mappings.into_iter().map(UrlMappingResponse::from).collect(),
    ))
}
