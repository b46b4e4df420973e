//! Permissive CORS for public image endpoints.

use axum::{
    extract::Request,
    http::{
        HeaderValue, Method, StatusCode,
        header::{ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Adds `Access-Control-Allow-Origin: *` to every response and answers
/// preflight `OPTIONS` requests with an empty `204`.
///
/// Must wrap the rate limiter so rejected requests carry the headers too.
///
/// # Example
///
/// ```rust,ignore
/// let qr = Router::new()
///     .route("/qr", get(qr_handler))
///     .layer(rate_limit::layer(2, 100))
///     .layer(middleware::from_fn(cors::layer));
/// ```
pub async fn layer(req: Request, next: Next) -> Response {
    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );

    response
}
