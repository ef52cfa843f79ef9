//! DTOs for the recent links endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::entities::Link;

/// Query parameters for `GET /api/links`.
///
/// Uses `serde_with` to parse the limit from the query string.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RecentLinksParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One entry of the recent links list.
#[derive(Debug, Serialize)]
pub struct LinkItem {
    pub code: String,
    pub short_url: String,
    pub destination_url: String,
    pub domain: Option<String>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub is_custom_alias: bool,
}

impl LinkItem {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            code: link.code,
            short_url,
            destination_url: link.destination_url,
            domain: link.domain,
            click_count: link.click_count,
            created_at: link.created_at,
            last_accessed_at: link.last_accessed_at,
            is_custom_alias: link.is_custom_alias,
        }
    }
}

/// Recent links, newest first.
#[derive(Debug, Serialize)]
pub struct RecentLinksResponse {
    /// Effective limit after clamping.
    pub limit: usize,
    pub items: Vec<LinkItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_parsed_from_string() {
        let params: RecentLinksParams = serde_json::from_str(r#"{"limit": "25"}"#).unwrap();
        assert_eq!(params.limit, Some(25));
    }

    #[test]
    fn test_limit_absent() {
        let params: RecentLinksParams = serde_json::from_str("{}").unwrap();
        assert!(params.limit.is_none());
    }

    #[test]
    fn test_limit_not_a_number() {
        assert!(serde_json::from_str::<RecentLinksParams>(r#"{"limit": "ten"}"#).is_err());
    }
}
