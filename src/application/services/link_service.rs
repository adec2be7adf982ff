//! Short link lifecycle: shorten, resolve, delete and list.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use metrics::counter;
use serde_json::json;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};
use url::Url;

use super::bounded;
use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, UniqueKey};
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::{SHORT_ID_LENGTH, generate_short_id, is_valid_short_id};

/// Insert attempts before giving up on short ID collisions.
const MAX_ID_ATTEMPTS: usize = 10;

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Settings the service needs from configuration.
#[derive(Debug, Clone)]
pub struct LinkServiceOptions {
    /// `http` or `https`.
    pub public_scheme: String,
    /// Host (with optional port) that short links point at.
    pub public_host: String,
    /// Deadline for each individual store call.
    pub store_timeout: Duration,
}

/// Result of a successful shorten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub short_id: String,
    pub short_url: String,
}

/// A normalized page of the mapping listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Normalizes raw paging input.
    ///
    /// Missing or non-positive values fall back to page 1 and a limit of
    /// [`DEFAULT_PAGE_LIMIT`]; limits above [`MAX_PAGE_LIMIT`] are clamped.
    pub fn normalize(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p >= 1 => u32::try_from(p).unwrap_or(u32::MAX),
            _ => 1,
        };
        let limit = match limit {
            Some(l) if l > i64::from(MAX_PAGE_LIMIT) => MAX_PAGE_LIMIT,
            Some(l) if l >= 1 => l as u32,
            _ => DEFAULT_PAGE_LIMIT,
        };
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::normalize(None, None)
    }
}

/// Service owning the short link lifecycle.
///
/// Resolution does not touch the click counter itself: it queues a
/// [`ClickEvent`] for [`crate::domain::click_worker::run_click_worker`] and
/// returns immediately.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
    click_sender: mpsc::Sender<ClickEvent>,
    options: LinkServiceOptions,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        click_sender: mpsc::Sender<ClickEvent>,
        options: LinkServiceOptions,
    ) -> Self {
        Self {
            link_repository,
            cache,
            click_sender,
            options,
        }
    }

    /// Creates a short link for `original_url`, or returns the existing one.
    ///
    /// # Deduplication
    ///
    /// Each original URL maps to exactly one short ID. A concurrent shorten of
    /// the same URL that wins the insert race is detected through the store's
    /// unique constraint and its mapping is returned instead.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute
    /// `http`/`https` URL with a host.
    ///
    /// Returns [`AppError::Store`] on storage errors, timeouts, or after
    /// [`MAX_ID_ATTEMPTS`] short ID collisions.
    pub async fn shorten(&self, original_url: &str) -> Result<ShortLink, AppError> {
        validate_original_url(original_url)?;

        if let Some(existing) = self.find_by_original_url(original_url).await? {
            debug!(short_id = %existing.short_id, "Reusing existing mapping");
            return Ok(self.short_link(existing.short_id));
        }

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let new_mapping = NewUrlMapping {
                short_id: generate_short_id(SHORT_ID_LENGTH),
                original_url: original_url.to_string(),
                created_at: Utc::now(),
            };

            let created = bounded(
                "create",
                self.options.store_timeout,
                self.link_repository.create(new_mapping),
            )
            .await;

            match created {
                Ok(mapping) => {
                    info!(short_id = %mapping.short_id, "Created short link");
                    return Ok(self.short_link(mapping.short_id));
                }
                Err(AppError::Conflict {
                    key: UniqueKey::OriginalUrl,
                    ..
                }) => {
                    if let Some(existing) = self.find_by_original_url(original_url).await? {
                        debug!(short_id = %existing.short_id, "Lost shorten race, reusing mapping");
                        return Ok(self.short_link(existing.short_id));
                    }
                }
                Err(AppError::Conflict {
                    key: UniqueKey::ShortId,
                    ..
                }) => {
                    debug!(attempt, "Short ID collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::store(format!(
            "no free short ID after {} attempts",
            MAX_ID_ATTEMPTS
        )))
    }

    /// Resolves a short ID to its original URL and queues a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for malformed IDs without touching
    /// the store, [`AppError::NotFound`] for unknown IDs, and
    /// [`AppError::Store`] on storage errors.
    pub async fn resolve(&self, short_id: &str) -> Result<String, AppError> {
        if !is_valid_short_id(short_id) {
            return Err(AppError::bad_request(
                "Invalid short ID",
                json!({ "short_id": short_id, "expected_length": SHORT_ID_LENGTH }),
            ));
        }

        let original_url = match self.cache.get_url(short_id).await {
            Ok(Some(url)) => url,
            Ok(None) => self.load_and_cache(short_id).await?,
            Err(e) => {
                warn!(short_id, error = %e, "Cache lookup failed, using store");
                self.load_and_cache(short_id).await?
            }
        };

        self.enqueue_click(short_id);

        Ok(original_url)
    }

    /// Deletes the mapping for `short_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty ID, [`AppError::NotFound`]
    /// if nothing was deleted, and [`AppError::Store`] on storage errors.
    pub async fn delete(&self, short_id: &str) -> Result<(), AppError> {
        if short_id.is_empty() {
            return Err(AppError::bad_request("Short ID is required", json!({})));
        }

        self.invalidate_cached(short_id).await;

        let deleted = bounded(
            "delete",
            self.options.store_timeout,
            self.link_repository.delete(short_id),
        )
        .await?;

        if !deleted {
            return Err(not_found(short_id));
        }

        // A resolve that read the row before the delete may have cached it since.
        self.invalidate_cached(short_id).await;

        info!(short_id, "Deleted short link");
        Ok(())
    }

    /// Returns one page of mappings, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn list(&self, page: PageRequest) -> Result<Vec<UrlMapping>, AppError> {
        bounded(
            "list",
            self.options.store_timeout,
            self.link_repository.list(page.offset(), i64::from(page.limit)),
        )
        .await
    }

    /// Builds the public short URL for `short_id`.
    pub fn short_url(&self, short_id: &str) -> String {
        format!(
            "{}://{}/{}",
            self.options.public_scheme,
            self.options.public_host.trim_end_matches('/'),
            short_id
        )
    }

    fn short_link(&self, short_id: String) -> ShortLink {
        ShortLink {
            short_url: self.short_url(&short_id),
            short_id,
        }
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        bounded(
            "find_by_original_url",
            self.options.store_timeout,
            self.link_repository.find_by_original_url(original_url),
        )
        .await
    }

    async fn load_and_cache(&self, short_id: &str) -> Result<String, AppError> {
        let mapping = bounded(
            "find_by_short_id",
            self.options.store_timeout,
            self.link_repository.find_by_short_id(short_id),
        )
        .await?
        .ok_or_else(|| not_found(short_id))?;

        if let Err(e) = self
            .cache
            .set_url(&mapping.short_id, &mapping.original_url, None)
            .await
        {
            warn!(short_id, error = %e, "Failed to cache mapping");
        }

        Ok(mapping.original_url)
    }

    async fn invalidate_cached(&self, short_id: &str) {
        if let Err(e) = self.cache.invalidate(short_id).await {
            warn!(short_id, error = %e, "Failed to invalidate cached mapping");
        }
    }

    fn enqueue_click(&self, short_id: &str) {
        match self.click_sender.try_send(ClickEvent::new(short_id)) {
            Ok(()) => {
                counter!("clicks_enqueued_total").increment(1);
            }
            Err(TrySendError::Full(_)) => {
                counter!("clicks_dropped_total").increment(1);
                warn!(short_id, "Click queue full, dropping click");
            }
            Err(TrySendError::Closed(_)) => {
                counter!("clicks_dropped_total").increment(1);
                warn!(short_id, "Click queue closed, dropping click");
            }
        }
    }
}

fn not_found(short_id: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "short_id": short_id }))
}

fn validate_original_url(original_url: &str) -> Result<(), AppError> {
    let invalid = |reason: String| {
        AppError::bad_request("Invalid URL format", json!({ "reason": reason }))
    };

    let parsed = Url::parse(original_url).map_err(|e| invalid(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "unsupported scheme '{}', expected http or https",
            parsed.scheme()
        )));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(invalid("URL has no host".to_string())),
    }
}
