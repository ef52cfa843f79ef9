//! Shared application state passed to all HTTP handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{LinkService, RedirectService, StatsService};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::CodeSettings;

/// Application state shared by every handler.
///
/// Cloning is cheap: every field is an `Arc` or a channel handle.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub redirect_service: Arc<RedirectService<dyn LinkRepository>>,
    pub stats_service: Arc<StatsService<dyn LinkRepository>>,
    pub repository: Arc<dyn LinkRepository>,
    pub cache: Arc<dyn CacheService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Default page size for `GET /api/links`.
    pub recent_links_limit: usize,
    /// Backend name reported by the health check (`postgres` or `memory`).
    pub store_backend: &'static str,
}

/// Settings the state needs beyond its collaborators.
#[derive(Debug, Clone)]
pub struct StateSettings {
    pub base_url: String,
    pub codes: CodeSettings,
    pub recent_links_limit: usize,
    pub store_backend: &'static str,
}

impl AppState {
    /// Wires the services around one repository, cache and click channel.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        click_sender: mpsc::Sender<ClickEvent>,
        settings: StateSettings,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(
            repository.clone(),
            settings.codes,
            settings.base_url,
        ));
        let redirect_service = Arc::new(RedirectService::new(
            repository.clone(),
            cache.clone(),
            click_sender.clone(),
        ));
        let stats_service = Arc::new(StatsService::new(repository.clone()));

        Self {
            link_service,
            redirect_service,
            stats_service,
            repository,
            cache,
            click_sender,
            recent_links_limit: settings.recent_links_limit,
            store_backend: settings.store_backend,
        }
    }
}
