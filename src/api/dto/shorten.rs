//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::ShortLink;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be an absolute HTTP/HTTPS URL).
    #[serde(rename = "originalURL", alias = "original_url")]
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,
}

/// Short link created for (or already mapped to) the requested URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    #[serde(rename = "shortID")]
    pub short_id: String,
    #[serde(rename = "shortURL")]
    pub short_url: String,
}

impl From<ShortLink> for ShortenResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            short_id: link.short_id,
            short_url: link.short_url,
        }
    }
}
