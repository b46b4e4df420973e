//! QR image rendering backends.
//!
//! - [`SvgQrRenderer`] - SVG documents built from the `qrcode` module matrix

mod svg_renderer;

pub use svg_renderer::SvgQrRenderer;
