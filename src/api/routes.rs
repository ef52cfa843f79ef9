//! API route configuration.

use crate::api::handlers::{recent_links_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten` - Create (or reuse) a short link
/// - `GET  /links`   - Most recently created links
/// - `GET  /stats`   - Link and click totals
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/links", get(recent_links_handler))
        .route("/stats", get(stats_handler))
}
