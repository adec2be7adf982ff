//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache of short ID → original URL.
///
/// Implementations must be thread-safe. The cache is never the source of
/// truth: callers fall back to the mapping store on a miss or an error.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL cached for `short_id`.
    ///
    /// Returns `Ok(None)` on a miss.
    async fn get_url(&self, short_id: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping with an optional TTL (implementation default if `None`).
    async fn set_url(
        &self,
        short_id: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a cached mapping. Called when a mapping is deleted.
    async fn invalidate(&self, short_id: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for health reports.
    fn backend(&self) -> &'static str;
}
