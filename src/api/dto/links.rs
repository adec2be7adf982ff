//! DTOs for mapping listing and deletion.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlMapping;

/// A mapping as returned by `GET /list`.
#[derive(Debug, Serialize)]
pub struct UrlMappingResponse {
    #[serde(rename = "shortID")]
    pub short_id: String,
    #[serde(rename = "originalURL")]
    pub original_url: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl From<UrlMapping> for UrlMappingResponse {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            short_id: mapping.short_id,
            original_url: mapping.original_url,
            created_at: mapping.created_at,
            clicks: mapping.clicks,
        }
    }
}

/// Confirmation body for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Short URL deleted successfully".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_mapping_wire_format() {
        let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
        let mapping = UrlMapping::new(
            "abcd1234".to_string(),
            "https://example.com".to_string(),
            created_at,
            5,
        );

        let json = serde_json::to_value(UrlMappingResponse::from(mapping)).unwrap();

        assert_eq!(json["shortID"], "abcd1234");
        assert_eq!(json["originalURL"], "https://example.com");
        assert_eq!(json["createdAt"], "2025-03-01T12:30:00Z");
        assert_eq!(json["clicks"], 5);
    }
}
