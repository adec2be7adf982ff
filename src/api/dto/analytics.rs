//! DTO for the analytics endpoint.

use serde::Serialize;

use crate::application::services::Analytics;

/// Store-wide totals.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    #[serde(rename = "totalURLs")]
    pub total_urls: i64,
    #[serde(rename = "totalClicks")]
    pub total_clicks: i64,
}

impl From<Analytics> for AnalyticsResponse {
    fn from(analytics: Analytics) -> Self {
        Self {
            total_urls: analytics.total_urls,
            total_clicks: analytics.total_clicks,
        }
    }
}
