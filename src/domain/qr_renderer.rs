//! Rendering seam between the QR service and an image backend.

use crate::domain::entities::RenderRequest;

/// Errors raised while turning a [`RenderRequest`] into an image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The value does not fit in a QR code at the requested error-correction level.
    #[error("Data too long for a QR code")]
    DataTooLong,

    #[error("QR encoding failed: {0}")]
    Encoding(String),
}

/// A rendered image and its media type.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

/// Produces QR images from fully resolved render requests.
///
/// # Implementations
///
/// - [`crate::infrastructure::render::SvgQrRenderer`] - SVG output
#[cfg_attr(test, mockall::automock)]
pub trait QrRenderer: Send + Sync {
    /// Renders a `size`×`size` image.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DataTooLong`] if the value exceeds QR capacity.
    fn render(&self, request: &RenderRequest) -> Result<RenderedImage, RenderError>;
}
