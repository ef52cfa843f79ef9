//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`      - Short link redirect
//! - `GET  /?r={code}`   - Short link redirect (query form)
//! - `GET  /health`      - Health check: store, cache, click queue
//! - `/api/*`            - REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter on `/api`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler, root_redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_redirect_handler))
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
}

/// Every route with tracing but without rate limiting.
///
/// Integration tests drive this router directly; the per-IP limiters need
/// the peer address from `ConnectInfo`, which only the real server provides.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(public_routes().layer(rate_limit::layer()))
        .nest(
            "/api",
            api::routes::api_routes().layer(rate_limit::api_layer()),
        )
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
