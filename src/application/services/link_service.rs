//! Short link issuance and listing service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkField, LinkRepository, OrderBy, SortDirection, StoreError};
use crate::error::AppError;
use crate::utils::code_generator::{CodeSettings, generate_code, validate_alias};
use crate::utils::destination::validate_destination;

/// Upper bound for recent-link listings.
pub const MAX_RECENT_LIMIT: usize = 100;

/// Outcome of [`LinkService::issue_short_link`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedLink {
    pub link: Link,
    /// False when an existing mapping for the same destination was reused.
    pub created: bool,
}

/// Service for creating and listing short links.
///
/// Handles destination and alias validation, destination dedup, and random
/// code generation with bounded collision retry.
pub struct LinkService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    codes: CodeSettings,
    base_url: String,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `base_url` is the public origin short URLs are built on.
    pub fn new(repository: Arc<L>, codes: CodeSettings, base_url: impl Into<String>) -> Self {
        Self {
            repository,
            codes,
            base_url: base_url.into(),
        }
    }

    /// Issues a short link for `destination_url`.
    ///
    /// # Validation
    ///
    /// Checked in order, the first failure wins:
    /// 1. The destination must be an absolute `http`/`https` URL
    /// 2. A supplied alias must pass [`validate_alias`]
    /// 3. A supplied alias must not already exist
    ///
    /// An empty alias counts as no alias.
    ///
    /// # Deduplication
    ///
    /// Without an alias, an existing link with a byte-identical destination is
    /// returned instead of creating a new one. A custom alias always creates a
    /// new mapping.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidDestination`], [`AppError::InvalidAlias`] on bad input
    /// - [`AppError::AliasTaken`] if the alias exists, including a lost insert race
    /// - [`AppError::CodeCollision`] if the store rejects a generated code
    /// - [`AppError::StoreReadFailed`] if a pre-write lookup fails
    /// - [`AppError::StoreWriteFailed`] if the insert fails
    pub async fn issue_short_link(
        &self,
        destination_url: &str,
        alias: Option<&str>,
    ) -> Result<IssuedLink, AppError> {
        let destination = validate_destination(destination_url)
            .map_err(|e| AppError::invalid_destination(destination_url, e.to_string()))?;

        let alias = alias.filter(|a| !a.is_empty());

        if let Some(alias) = alias {
            validate_alias(alias)?;

            if self
                .repository
                .get(alias)
                .await
                .map_err(AppError::StoreReadFailed)?
                .is_some()
            {
                return Err(AppError::AliasTaken {
                    alias: alias.to_string(),
                });
            }

            let new_link = NewLink::with_alias(
                alias.to_string(),
                destination_url.to_string(),
                destination.domain,
            );

            let link = self.repository.put(new_link).await.map_err(|e| match e {
                StoreError::AlreadyExists(_) => AppError::AliasTaken {
                    alias: alias.to_string(),
                },
                other => AppError::StoreWriteFailed(other),
            })?;

            info!(code = %link.code, "Issued custom alias");
            metrics::counter!("links_issued_total", "kind" => "alias").increment(1);
            return Ok(IssuedLink {
                link,
                created: true,
            });
        }

        if let Some(existing) = self
            .repository
            .find_one(LinkField::DestinationUrl, destination_url)
            .await
            .map_err(AppError::StoreReadFailed)?
        {
            debug!(code = %existing.code, "Destination already shortened, reusing link");
            return Ok(IssuedLink {
                link: existing,
                created: false,
            });
        }

        let code = self.generate_unique_code().await?;
        let new_link = NewLink::generated(code, destination_url.to_string(), destination.domain);

        let link = self.repository.put(new_link).await.map_err(|e| match e {
            StoreError::AlreadyExists(code) => AppError::CodeCollision { code },
            other => AppError::StoreWriteFailed(other),
        })?;

        info!(code = %link.code, "Issued generated code");
        metrics::counter!("links_issued_total", "kind" => "generated").increment(1);
        Ok(IssuedLink {
            link,
            created: true,
        })
    }

    /// Lists the most recently created links, newest first.
    ///
    /// `limit` is clamped to `1..=100`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreReadFailed`] if the store cannot be read.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<Link>, AppError> {
        self.list_links(OrderBy::CreatedAt, SortDirection::Desc, limit).await
    }

    /// Lists links in an arbitrary order, with the same limit clamp as
    /// [`Self::list_recent`].
    pub async fn list_links(
        &self,
        order_by: OrderBy,
        direction: SortDirection,
        limit: usize,
    ) -> Result<Vec<Link>, AppError> {
        let limit = limit.clamp(1, MAX_RECENT_LIMIT);

        self.repository
            .list_recent(order_by, direction, limit)
            .await
            .map_err(AppError::StoreReadFailed)
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Picks a code that is not present in the store.
    ///
    /// Each candidate is checked with a lookup. After `max_attempts`
    /// collisions a longer code is returned without a lookup; the unique
    /// insert in `put` still guards it.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for attempt in 1..=self.codes.max_attempts {
            let code = generate_code(self.codes.length);

            if self
                .repository
                .get(&code)
                .await
                .map_err(AppError::StoreReadFailed)?
                .is_none()
            {
                return Ok(code);
            }

            debug!(attempt, %code, "Generated code collided");
        }

        let fallback = generate_code(self.codes.fallback_length());
        warn!(
            attempts = self.codes.max_attempts,
            code = %fallback,
            "Code space crowded, falling back to a longer code"
        );
        Ok(fallback)
    }
}
