//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for URL mapping storage and retrieval.
///
/// Uses bound parameters for every query. Uniqueness of `short_id` and
/// `original_url` is enforced by the schema and surfaced as
/// [`AppError::Conflict`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let mapping = sqlx::query_as::<_, UrlMapping>(
            r#"
            INSERT INTO url_mappings (short_id, original_url, created_at, clicks)
            VALUES ($1, $2, $3, 0)
            RETURNING short_id, original_url, created_at, clicks
            "#,
        )
        .bind(&new_mapping.short_id)
        .bind(&new_mapping.original_url)
        .bind(new_mapping.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(mapping)
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<UrlMapping>, AppError> {
        let mapping = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT short_id, original_url, created_at, clicks
            FROM url_mappings
            WHERE short_id = $1
            "#,
        )
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(mapping)
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        let mapping = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT short_id, original_url, created_at, clicks
            FROM url_mappings
            WHERE original_url = $1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(mapping)
    }

    async fn delete(&self, short_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM url_mappings WHERE short_id = $1")
            .bind(short_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<UrlMapping>, AppError> {
        let mappings = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT short_id, original_url, created_at, clicks
            FROM url_mappings
            ORDER BY created_at DESC, short_id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(mappings)
    }
}
