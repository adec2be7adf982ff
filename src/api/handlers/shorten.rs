//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a URL, or returns the one it already has.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "originalURL": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortID": "aB3dE6gH", "shortURL": "http://localhost:8080/aB3dE6gH" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for malformed JSON, a missing field, or an invalid URL.
/// Returns 500 Internal Server Error on storage failures.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    payload.validate()?;

    let link = state.link_service.shorten(&payload.original_url).await?;

    Ok(Json(link.into()))
}
