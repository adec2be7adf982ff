//! Pagination query parameters.

use serde::Deserialize;

use crate::application::services::PageRequest;

/// Raw `page` / `limit` query parameters.
///
/// Values are kept as strings so that garbage input falls back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: Option<String>,

    #[serde(default)]
    pub limit: Option<String>,
}

impl ListParams {
    /// Parses and normalizes the parameters.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `limit`: 20, clamped to at most 100
    pub fn page_request(&self) -> PageRequest {
        PageRequest::normalize(parse(&self.page), parse(&self.limit))
    }
}

fn parse(value: &Option<String>) -> Option<i64> {
    value.as_deref().and_then(|v| v.trim().parse().ok())
}
