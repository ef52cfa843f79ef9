//! Short code resolution service.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::click_worker::dispatch_click;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::is_well_formed_code;

/// Resolves short codes to destinations and queues click increments.
///
/// Lookups go through the cache first; destinations never change, so a
/// cached entry is always valid. The click increment is handed to the click
/// worker after the redirect decision and is never awaited here.
pub struct RedirectService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    cache: Arc<dyn CacheService>,
    click_sender: mpsc::Sender<ClickEvent>,
}

impl<L: LinkRepository + ?Sized> RedirectService<L> {
    pub fn new(
        repository: Arc<L>,
        cache: Arc<dyn CacheService>,
        click_sender: mpsc::Sender<ClickEvent>,
    ) -> Self {
        Self {
            repository,
            cache,
            click_sender,
        }
    }

    /// Resolves `code` to its destination URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code, including
    /// codes that cannot exist (bad characters or length); those never reach
    /// the store. Returns [`AppError::StoreReadFailed`] if the lookup fails.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if !is_well_formed_code(code) {
            return Err(AppError::NotFound {
                code: code.to_string(),
            });
        }

        let destination = match self.cache.get_url(code).await {
            Ok(Some(url)) => {
                debug!(code, "Cache HIT");
                url
            }
            Ok(None) => self.lookup(code).await?,
            Err(e) => {
                warn!(code, error = %e, "Cache error, falling back to store");
                self.lookup(code).await?
            }
        };

        dispatch_click(&self.click_sender, ClickEvent::new(code));
        metrics::counter!("redirects_total").increment(1);

        Ok(destination)
    }

    /// Reads the destination from the store and fills the cache in the background.
    async fn lookup(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .repository
            .get(code)
            .await
            .map_err(AppError::StoreReadFailed)?
            .ok_or_else(|| AppError::NotFound {
                code: code.to_string(),
            })?;

        let cache = self.cache.clone();
        let key = link.code.clone();
        let url = link.destination_url.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.set_url(&key, &url, None).await {
                error!("Failed to cache URL: {}", e);
            }
        });

        Ok(link.destination_url)
    }
}
