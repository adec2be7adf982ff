//! In-process mapping store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::error::{AppError, UniqueKey};

/// In-memory implementation of both repository traits using DashMap.
///
/// Mirrors the PostgreSQL schema: `short_id` is the key and `original_url`
/// is kept unique through a secondary index. Sharded locks let unrelated
/// short IDs be read and incremented concurrently.
///
/// Nothing is persisted; intended for tests and local experiments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    mappings: DashMap<String, UrlMapping>,
    by_original_url: DashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        // Lock order is always url index -> mappings.
        match self.by_original_url.entry(new_mapping.original_url.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                UniqueKey::OriginalUrl,
                "Original URL is already shortened",
            )),
            Entry::Vacant(url_slot) => match self.mappings.entry(new_mapping.short_id.clone()) {
                Entry::Occupied(_) => Err(AppError::conflict(
                    UniqueKey::ShortId,
                    "Short ID already exists",
                )),
                Entry::Vacant(id_slot) => {
                    let mapping = new_mapping.into_mapping();
                    id_slot.insert(mapping.clone());
                    url_slot.insert(mapping.short_id.clone());
                    Ok(mapping)
                }
            },
        }
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<UrlMapping>, AppError> {
        Ok(self.mappings.get(short_id).map(|m| m.value().clone()))
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        let Some(short_id) = self
            .by_original_url
            .get(original_url)
            .map(|id| id.value().clone())
        else {
            return Ok(None);
        };

        Ok(self.mappings.get(&short_id).map(|m| m.value().clone()))
    }

    async fn delete(&self, short_id: &str) -> Result<bool, AppError> {
        let Some((_, removed)) = self.mappings.remove(short_id) else {
            return Ok(false);
        };

        self.by_original_url
            .remove_if(&removed.original_url, |_, id| id == short_id);

        Ok(true)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<UrlMapping>, AppError> {
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);

        let mut all: Vec<UrlMapping> = self.mappings.iter().map(|m| m.value().clone()).collect();
        all.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.short_id.cmp(&b.short_id))
        });

        Ok(all.into_iter().skip(offset).take(limit).collect())
    }
}

#[async_trait]
impl StatsRepository for MemoryStore {
    async fn increment_clicks(&self, short_id: &str) -> Result<bool, AppError> {
        Ok(self
            .mappings
            .get_mut(short_id)
            .map(|mut mapping| mapping.clicks += 1)
            .is_some())
    }

    async fn count_mappings(&self) -> Result<i64, AppError> {
        Ok(self.mappings.len() as i64)
    }

    async fn sum_clicks(&self) -> Result<i64, AppError> {
        Ok(self.mappings.iter().map(|m| m.clicks).sum())
    }
}
