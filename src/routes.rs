//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`        - Health check: DB and cache
//! - `GET  /api/qr`        - Branded QR code (rate limited, CORS enabled)
//! - `GET  /embed/widget`  - Partner embed widget (token in query string)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the QR route
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::RateLimitConfig;
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `limits` - QR route rate limit; `behind_proxy` makes the limiter read
///   the client IP from forwarding headers, so enable it only behind a
///   trusted reverse proxy
pub fn app_router(state: AppState, limits: &RateLimitConfig) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::qr_routes(limits))
        .nest("/embed", web::routes::embed_routes())
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
