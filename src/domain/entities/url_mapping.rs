//! URL mapping entity, the association between a short ID and its target.

use chrono::{DateTime, Utc};

/// A persisted short ID → original URL mapping.
///
/// `short_id` and `created_at` never change after creation; `clicks` only
/// grows, through the store's atomic increment.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlMapping {
    pub short_id: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(
        short_id: String,
        original_url: String,
        created_at: DateTime<Utc>,
        clicks: i64,
    ) -> Self {
        Self {
            short_id,
            original_url,
            created_at,
            clicks,
        }
    }
}

/// Input data for creating a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub short_id: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewUrlMapping {
    /// Materializes the mapping as stored, with a zeroed click counter.
    pub fn into_mapping(self) -> UrlMapping {
        UrlMapping::new(self.short_id, self.original_url, self.created_at, 0)
    }
}
