//! Link entity representing a short code to destination mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored mapping between a short code and a destination URL.
///
/// `destination_url` is kept exactly as submitted and never changes after
/// creation. `click_count` and `last_accessed_at` are only touched by the
/// store's atomic increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub code: String,
    pub destination_url: String,
    pub domain: Option<String>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub is_custom_alias: bool,
}

impl Link {
    /// Materializes a freshly inserted record from its creation input.
    pub fn from_new(new_link: NewLink, created_at: DateTime<Utc>) -> Self {
        Self {
            code: new_link.code,
            destination_url: new_link.destination_url,
            domain: new_link.domain,
            click_count: 0,
            created_at,
            last_accessed_at: None,
            is_custom_alias: new_link.is_custom_alias,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub destination_url: String,
    pub domain: Option<String>,
    pub is_custom_alias: bool,
}

impl NewLink {
    /// A link keyed by a user-supplied alias.
    pub fn with_alias(alias: String, destination_url: String, domain: Option<String>) -> Self {
        Self {
            code: alias,
            destination_url,
            domain,
            is_custom_alias: true,
        }
    }

    /// A link keyed by a generated code.
    pub fn generated(code: String, destination_url: String, domain: Option<String>) -> Self {
        Self {
            code,
            destination_url,
            domain,
            is_custom_alias: false,
        }
    }
}

/// Aggregate counts over the whole store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkTotals {
    pub total_links: i64,
    pub total_clicks: i64,
}
