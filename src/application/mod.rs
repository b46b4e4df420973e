//! Application layer services implementing business logic.
//!
//! Services consume repository traits and the cache, and provide a small API
//! for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::qr_service::QrService`] - Branded QR code generation
//! - [`services::embed_service::EmbedService`] - Partner embed widget data and tokens

pub mod services;
