//! Embed route configuration.

use crate::state::AppState;
use crate::web::handlers::embed_widget_handler;
use axum::{Router, routing::get};

/// Public embed routes. Access is granted by the token in the query string.
///
/// # Endpoints
///
/// - `GET /widget` - Partner earnings widget
pub fn embed_routes() -> Router<AppState> {
    Router::new().route("/widget", get(embed_widget_handler))
}
