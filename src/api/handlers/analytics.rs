//! Handler for aggregate analytics.

use axum::{Json, extract::State};

use crate::api::dto::analytics::AnalyticsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the number of short links and the sum of their clicks.
///
/// # Endpoint
///
/// `GET /analytics`
///
/// # Response
///
/// ```json
/// { "totalURLs": 3, "totalClicks": 8 }
/// ```
pub async fn analytics_handler(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let analytics = state.stats_service.analytics().await?;

    Ok(Json(analytics.into()))
}
