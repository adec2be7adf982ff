//! Repository trait for URL mapping data access.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing URL mappings.
///
/// Mappings are addressable both by short ID and by original URL. Both keys
/// are unique at the store level.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] with [`crate::error::UniqueKey::ShortId`]
    /// if the short ID is taken, or [`crate::error::UniqueKey::OriginalUrl`]
    /// if the URL is already mapped.
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Finds a mapping by its short ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlMapping))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Finds a mapping by its original URL.
    ///
    /// Used to deduplicate shorten requests.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError>;

    /// Removes a mapping.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn delete(&self, short_id: &str) -> Result<bool, AppError>;

    /// Lists mappings newest first.
    ///
    /// # Arguments
    ///
    /// - `offset` - Number of mappings to skip
    /// - `limit` - Maximum number of mappings to return
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<UrlMapping>, AppError>;
}
