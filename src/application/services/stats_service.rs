//! Store-wide statistics service.

use std::sync::Arc;

use crate::domain::entities::LinkTotals;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Service for aggregate link statistics.
pub struct StatsService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> StatsService<L> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<L>) -> Self {
        Self { repository }
    }

    /// Returns the number of links and the sum of their click counters.
    ///
    /// Clicks still queued for the click worker are not included yet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreReadFailed`] on store errors.
    pub async fn stats(&self) -> Result<LinkTotals, AppError> {
        self.repository
            .count_all()
            .await
            .map_err(AppError::StoreReadFailed)
    }
}
