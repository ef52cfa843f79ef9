//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache of code to destination mappings.
///
/// Destinations are immutable and links are never deleted, so entries only
/// expire by TTL. A cache error never fails a redirect: the resolver logs it
/// and reads the store instead.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached destination for `code`, `Ok(None)` on a miss.
    async fn get_url(&self, code: &str) -> CacheResult<Option<String>>;

    /// Stores a destination, using the implementation's default TTL when
    /// `ttl_seconds` is `None`.
    async fn set_url(
        &self,
        code: &str,
        destination_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for health reports.
    fn backend(&self) -> &'static str;
}
