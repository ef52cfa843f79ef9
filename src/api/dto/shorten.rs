//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::IssuedLink;
use crate::error::AppError;

const URL_LENGTH_MESSAGE: &str = "URL must be 1-2048 characters";

/// Request to shorten a single URL.
///
/// Only the destination length is checked here, and a failure is reported as
/// an invalid destination so a bad destination always wins over a bad alias.
/// Format rules are enforced by the link service.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The destination to shorten (absolute `http`/`https` URL).
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Optional custom short code.
    #[serde(default)]
    pub alias: Option<String>,
}

impl ShortenRequest {
    /// Runs the field checks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidDestination`] if the URL is empty or longer
    /// than 2048 characters.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|_| AppError::invalid_destination(&self.url, URL_LENGTH_MESSAGE))
    }

    /// Destination with surrounding whitespace removed.
    pub fn destination(&self) -> &str {
        self.url.trim()
    }

    /// Alias with surrounding whitespace removed; blank counts as absent.
    pub fn alias(&self) -> Option<&str> {
        self.alias
            .as_deref()
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
    }
}

/// A created or reused short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    pub destination_url: String,
    pub domain: Option<String>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub is_custom_alias: bool,
    /// False when an existing link for the same destination was returned.
    pub created: bool,
}

impl ShortenResponse {
    pub fn new(issued: IssuedLink, short_url: String) -> Self {
        let link = issued.link;

        Self {
            code: link.code,
            short_url,
            destination_url: link.destination_url,
            domain: link.domain,
            click_count: link.click_count,
            created_at: link.created_at,
            is_custom_alias: link.is_custom_alias,
            created: issued.created,
        }
    }
}
