//! Handlers for short URL redirects.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Query parameters of the root route.
#[derive(Debug, Deserialize)]
pub struct RootRedirectParams {
    pub r: Option<String>,
}

/// Redirects a short code to its destination.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Check cache for the destination
/// 2. On cache miss or cache error, read the store
/// 3. Asynchronously fill the cache
/// 4. Queue a click increment for the background worker
/// 5. Return 307 Temporary Redirect
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 503 Service Unavailable if the store read fails.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let destination = state.redirect_service.resolve(&code).await?;
    temporary_redirect(&destination)
}

/// Redirects `/?r=<code>` the same way as `/{code}`.
///
/// # Endpoint
///
/// `GET /?r={code}`
///
/// # Errors
///
/// Returns 400 Bad Request if `r` is missing or empty, otherwise the same
/// errors as [`redirect_handler`].
pub async fn root_redirect_handler(
    Query(params): Query<RootRedirectParams>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let code = params
        .r
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or_else(|| {
            AppError::bad_request(
                "Missing short code",
                json!({ "parameter": "r", "expected": "GET /?r=<code>" }),
            )
        })?;

    let destination = state.redirect_service.resolve(code).await?;
    temporary_redirect(&destination)
}

fn temporary_redirect(destination: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(destination)
        .map_err(|_| AppError::internal("Stored destination is not a valid header value"))?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}
