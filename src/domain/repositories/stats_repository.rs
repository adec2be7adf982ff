//! Repository trait for click counting and aggregate analytics.

use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for click counters and aggregates.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStatsRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_stats.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Atomically adds one to the click counter of `short_id`.
    ///
    /// The increment happens inside the store; implementations must never
    /// read the counter and write it back.
    ///
    /// Returns `Ok(false)` if the mapping no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn increment_clicks(&self, short_id: &str) -> Result<bool, AppError>;

    /// Counts all mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn count_mappings(&self) -> Result<i64, AppError>;

    /// Sums the click counters of all mappings. Returns 0 for an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn sum_clicks(&self) -> Result<i64, AppError>;
}
