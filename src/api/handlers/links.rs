//! Handler for the recent links listing.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::links::{LinkItem, RecentLinksParams, RecentLinksResponse};
use crate::application::services::link_service::MAX_RECENT_LIMIT;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the most recently created links, newest first.
///
/// # Endpoint
///
/// `GET /api/links?limit={n}`
///
/// `limit` defaults to `RECENT_LINKS_LIMIT` and is clamped to 1..=100.
pub async fn recent_links_handler(
    State(state): State<AppState>,
    Query(params): Query<RecentLinksParams>,
) -> Result<Json<RecentLinksResponse>, AppError> {
    let limit = params
        .limit
        .unwrap_or(state.recent_links_limit)
        .clamp(1, MAX_RECENT_LIMIT);

    let links = state.link_service.list_recent(limit).await?;

    let items = links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.code);
            LinkItem::new(link, short_url)
        })
        .collect();

    Ok(Json(RecentLinksResponse { limit, items }))
}
