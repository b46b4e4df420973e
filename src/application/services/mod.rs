//! Business logic services for the application layer.

pub mod embed_service;
pub mod qr_service;

pub use embed_service::EmbedService;
pub use qr_service::QrService;
