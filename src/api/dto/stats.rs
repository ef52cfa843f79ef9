//! DTOs for the aggregate statistics endpoint.

use serde::Serialize;

use crate::domain::entities::LinkTotals;

/// Totals across every stored link.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_links: i64,
    pub total_clicks: i64,
}

impl From<LinkTotals> for StatsResponse {
    fn from(totals: LinkTotals) -> Self {
        Self {
            total_links: totals.total_links,
            total_clicks: totals.total_clicks,
        }
    }
}
