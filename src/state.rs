//! Shared application state injected into handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{LinkService, LinkServiceOptions, StatsService};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::infrastructure::cache::CacheService;

/// Handles shared by every request.
///
/// Cloning is cheap: every field is reference counted or a channel handle.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub stats_service: Arc<StatsService>,
    pub cache: Arc<dyn CacheService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
}

impl AppState {
    /// Wires the services on top of the given store and cache.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        stats_repository: Arc<dyn StatsRepository>,
        cache: Arc<dyn CacheService>,
        click_sender: mpsc::Sender<ClickEvent>,
        options: LinkServiceOptions,
    ) -> Self {
        let store_timeout = options.store_timeout;
        let link_service = LinkService::new(
            link_repository,
            cache.clone(),
            click_sender.clone(),
            options,
        );

        Self {
            link_service: Arc::new(link_service),
            stats_service: Arc::new(StatsService::new(stats_repository, store_timeout)),
            cache,
            click_sender,
        }
    }
}
