//! API route configuration.

use crate::api::handlers::qr_handler;
use crate::api::middleware::cors;
use crate::api::middleware::rate_limit::{self, RateLimitConfig};
use crate::state::AppState;
use axum::{Router, middleware, routing::get};

/// Public QR routes, rate limited per client IP.
///
/// # Endpoints
///
/// - `GET     /qr` - Render a branded QR code
/// - `OPTIONS /qr` - CORS preflight, answered by [`cors::layer`]
///
/// CORS headers wrap the rate limiter, so `429` responses carry them as well
/// and preflights never use up a client's quota.
pub fn qr_routes(limits: &RateLimitConfig) -> Router<AppState> {
    let router = Router::new().route("/qr", get(qr_handler));

    let router = if limits.behind_proxy {
        router.layer(rate_limit::proxied_layer(limits.per_second, limits.burst))
    } else {
        router.layer(rate_limit::layer(limits.per_second, limits.burst))
    };

    router.layer(middleware::from_fn(cors::layer))
}
