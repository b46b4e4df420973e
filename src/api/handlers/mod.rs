//! HTTP request handlers for API endpoints.

pub mod health;
pub mod qr;

pub use health::health_handler;
pub use qr::qr_handler;
