//! Repository trait for the link store.

use crate::domain::entities::{Link, LinkTotals, NewLink};
use crate::domain::repositories::StoreError;
use async_trait::async_trait;

/// Record fields that can be used for single-record lookups besides the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    DestinationUrl,
}

/// Numeric counters that support atomic increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Clicks,
}

/// Fields usable as a sort key for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    CreatedAt,
    LastAccessedAt,
    ClickCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Store interface for link mappings.
///
/// Every method is a single round trip to the backing store and may fail
/// independently. Uniqueness of codes and correctness of counters are the
/// store's responsibility: `put` is a unique-key insert and `increment` is
/// an atomic add.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Fetches a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] or [`StoreError::PermissionDenied`]
    /// when the store cannot be read.
    async fn get(&self, code: &str) -> Result<Option<Link>, StoreError>;

    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if the code is taken and
    /// [`StoreError::PermissionDenied`] if the store refuses the write.
    async fn put(&self, new_link: NewLink) -> Result<Link, StoreError>;

    /// Finds the first link whose `field` equals `value` exactly.
    async fn find_one(&self, field: LinkField, value: &str) -> Result<Option<Link>, StoreError>;

    /// Atomically adds `delta` to a counter of the link identified by `code`.
    ///
    /// Bumping [`Counter::Clicks`] also stamps `last_accessed_at` with the
    /// store's current time. Incrementing an unknown code is a no-op.
    async fn increment(&self, code: &str, counter: Counter, delta: i64) -> Result<(), StoreError>;

    /// Lists up to `limit` links sorted by `order_by`.
    async fn list_recent(
        &self,
        order_by: OrderBy,
        direction: SortDirection,
        limit: usize,
    ) -> Result<Vec<Link>, StoreError>;

    /// Counts all links and sums their click counters.
    async fn count_all(&self) -> Result<LinkTotals, StoreError>;
}
