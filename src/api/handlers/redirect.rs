//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short ID to its original URL.
///
/// # Endpoint
///
/// `GET /{short_id}`
///
/// # Request Flow
///
/// 1. Validate the short ID shape
/// 2. Check cache, falling back to the store on miss or cache error
/// 3. Queue a click event for the background worker
/// 4. Return 302 Found
///
/// # Click Tracking
///
/// Click events are sent to a bounded channel for async processing.
/// If the queue is full, the click is dropped and the redirect still succeeds.
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed short ID.
/// Returns 404 Not Found if the short ID doesn't exist.
pub async fn redirect_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.link_service.resolve(&short_id).await?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, location(&original_url)?)],
    ))
}

/// Builds the `Location` header, re-serializing non-ASCII URLs in their
/// percent-encoded form.
fn location(original_url: &str) -> Result<HeaderValue, AppError> {
    if let Ok(value) = HeaderValue::from_str(original_url) {
        return Ok(value);
    }

    Url::parse(original_url)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| AppError::store(format!("unusable redirect target: {}", original_url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_plain_url() {
        let value = location("https://example.com/a?b=c").unwrap();
        assert_eq!(value, "https://example.com/a?b=c");
    }

    #[test]
    fn test_location_encodes_non_ascii() {
        let value = location("https://example.com/caf\u{e9}").unwrap();
        assert_eq!(value, "https://example.com/caf%C3%A9");
    }

    #[test]
    fn test_location_error_details_are_hidden() {
        let err = location("not a url\n").unwrap_err();
        assert_eq!(err.to_error_info().message, "Storage error");
    }
}
