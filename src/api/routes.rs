//! API route configuration.

use crate::api::handlers::{
    analytics_handler, delete_link_handler, health_handler, list_links_handler,
    redirect_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `POST   /shorten`      - Create (or reuse) a short link
/// - `GET    /list`         - Paginated mapping listing
/// - `GET    /analytics`    - Total links and clicks
/// - `GET    /health`       - Component health report
/// - `GET    /{short_id}`   - Redirect to the original URL
/// - `DELETE /{short_id}`   - Delete a short link
///
/// Static segments take priority over `/{short_id}`, so a short ID can never
/// shadow `/list`, `/analytics` or `/health`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/list", get(list_links_handler))
        .route("/analytics", get(analytics_handler))
        .route("/health", get(health_handler))
        .route(
            "/{short_id}",
            get(redirect_handler).delete(delete_link_handler),
        )
}
