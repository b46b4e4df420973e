//! Handlers for the QR image endpoint.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::header,
    response::IntoResponse,
};
use serde_json::json;

use crate::api::dto::qr::QrQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Renders a QR code with workspace-aware branding.
///
/// # Endpoint
///
/// `GET /api/qr`
///
/// # Query Parameters
///
/// - `url` (required): Value to encode
/// - `logo` (optional): Caller logo URL
/// - `size` (optional): Side in pixels, 32 to 4096 (default: 600)
/// - `level` (optional): `L`, `M`, `Q` or `H` (default: `L`)
/// - `fgColor` / `bgColor` (optional): `#RGB` or `#RRGGBB`
/// - `margin` (optional): Quiet zone in modules, up to 32 (default: 2)
/// - `hideLogo` (optional): `true` to drop the workspace logo
///
/// # Branding
///
/// Unknown links, links without a workspace, and free-plan workspaces always
/// get the platform logo. See [`crate::domain::branding::resolve_logo`].
///
/// # Response
///
/// `200 OK` with an `image/svg+xml` body.
///
/// # Errors
///
/// - `400 Bad Request` - malformed parameters or data too long for a QR code
/// - `429 Too Many Requests` - rate limit exceeded
pub async fn qr_handler(
    State(state): State<AppState>,
    query: Result<Query<QrQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query.map_err(|e| {
        AppError::bad_request(
            "Invalid query parameters",
            json!({ "reason": e.body_text() }),
        )
    })?;

    let params = query.into_params()?;
    let image = state.qr_service.generate(params).await?;

    Ok(([(header::CONTENT_TYPE, image.content_type)], image.body))
}

