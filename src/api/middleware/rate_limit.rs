//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::PeerIpKeyExtractor,
};

type IpGovernorLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Builds a per-IP governor config.
///
/// Both arguments are non-zero constants, so `finish` cannot fail here.
fn ip_config(
    per_second: u64,
    burst_size: u32,
) -> Arc<GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>>> {
    Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .expect("rate limit period and burst size are non-zero"),
    )
}

/// Creates a rate limiter for public endpoints (redirects, health).
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/{code}", get(redirect_handler))
///     .layer(rate_limit::layer());
/// ```
pub fn layer() -> IpGovernorLayer {
    GovernorLayer::new(ip_config(2, 100))
}

/// Creates a stricter rate limiter for the API.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Applied to link creation and listings, which hit the store on every call.
pub fn api_layer() -> IpGovernorLayer {
    GovernorLayer::new(ip_config(1, 10))
}
