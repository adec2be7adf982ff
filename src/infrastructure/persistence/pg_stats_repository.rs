//! PostgreSQL implementation of statistics repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// PostgreSQL repository for click counters and aggregates.
///
/// Increments are a single `UPDATE ... SET clicks = clicks + 1`, so concurrent
/// resolutions of the same short ID never lose updates.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn increment_clicks(&self, short_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE url_mappings
            SET clicks = clicks + 1
            WHERE short_id = $1
            "#,
        )
        .bind(short_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_mappings(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn sum_clicks(&self) -> Result<i64, AppError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM url_mappings")
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(total)
    }
}
