//! Handler for aggregate statistics.

use axum::{Json, extract::State};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the number of stored links and the sum of their clicks.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// # Response
///
/// ```json
/// { "total_links": 42, "total_clicks": 1337 }
/// ```
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let totals = state.stats_service.stats().await?;
    Ok(Json(totals.into()))
}
