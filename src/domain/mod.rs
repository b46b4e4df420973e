//! Domain layer containing business entities and logic.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository and renderer traits define the contracts the
//! infrastructure layer implements.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`branding`] - QR logo precedence (pure)
//! - [`qr_renderer`] - Image rendering seam
//!
//! # QR Request Flow
//!
//! 1. HTTP handler validates query parameters into [`entities::QrParams`]
//! 2. Short link, then its workspace, are looked up
//! 3. [`branding::resolve_logo`] picks the effective logo
//! 4. A [`entities::RenderRequest`] is handed to the [`QrRenderer`]

pub mod branding;
pub mod entities;
pub mod qr_renderer;
pub mod repositories;

pub use qr_renderer::{QrRenderer, RenderError, RenderedImage};
