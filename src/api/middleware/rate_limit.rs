//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Token bucket settings for the public QR endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Tokens replenished per second.
    pub per_second: u64,
    /// Bucket size.
    pub burst: u32,
    /// Read the client IP from `X-Forwarded-For` / `X-Real-IP` instead of the
    /// peer socket address.
    pub behind_proxy: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 2,
            burst: 100,
            behind_proxy: false,
        }
    }
}

/// Creates a per-IP rate limiter keyed on the peer socket address.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/qr", get(qr_handler))
///     .layer(rate_limit::layer(2, 100));
/// ```
pub fn layer(
    per_second: u64,
    burst: u32,
) -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second.max(1))
            .burst_size(burst.max(1))
            .finish()
            .expect("non-zero rate limit"),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates a per-IP rate limiter for deployments behind a trusted reverse proxy.
///
/// The client IP comes from `X-Forwarded-For`, `X-Real-IP` or `Forwarded`,
/// falling back to the peer address.
pub fn proxied_layer(
    per_second: u64,
    burst: u32,
) -> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second.max(1))
            .burst_size(burst.max(1))
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .expect("non-zero rate limit"),
    );

    GovernorLayer::new(governor_conf)
}
