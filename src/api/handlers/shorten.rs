//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link, or returns the existing one for the same destination.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/page",
///   "alias": "mylink"
/// }
/// ```
///
/// `alias` is optional. Without it, a destination that was already shortened
/// returns its existing code.
///
/// # Response
///
/// - **201 Created**: a new link was stored
/// - **200 OK**: an existing link was reused
///
/// ```json
/// {
///   "code": "mylink",
///   "short_url": "http://localhost:3000/mylink",
///   "destination_url": "https://example.com/page",
///   "domain": "example.com",
///   "click_count": 0,
///   "created_at": "2026-01-01T00:00:00Z",
///   "is_custom_alias": true,
///   "created": true
/// }
/// ```
///
/// # Errors
///
/// - 400 `invalid_destination` / `invalid_alias`
/// - 409 `alias_taken` / `code_collision`
/// - 403 `permission_denied`, 503 `store_write_failed` / `store_read_failed`
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.check()?;

    let issued = state
        .link_service
        .issue_short_link(payload.destination(), payload.alias())
        .await?;

    let status = if issued.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let short_url = state.link_service.short_url(&issued.link.code);

    Ok((status, Json(ShortenResponse::new(issued, short_url))))
}
