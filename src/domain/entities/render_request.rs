//! QR rendering parameters.

use serde::Deserialize;

/// QR error-correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ErrorCorrection {
    #[default]
    L,
    M,
    Q,
    H,
}

/// Validated parameters of a QR request, before branding is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct QrParams {
    pub url: String,
    pub logo: Option<String>,
    pub size: u32,
    pub level: ErrorCorrection,
    pub fg_color: String,
    pub bg_color: String,
    pub margin: u32,
    pub hide_logo: bool,
}

/// Logo overlay placed in the centre of the code.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSettings {
    pub src: String,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Clear the modules underneath the logo.
    pub excavate: bool,
}

/// Fully resolved input for a [`crate::domain::QrRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub value: String,
    pub size: u32,
    pub level: ErrorCorrection,
    pub fg_color: String,
    pub bg_color: String,
    pub margin: u32,
    pub image: Option<ImageSettings>,
}

impl RenderRequest {
    /// Builds the render input from request parameters and the effective logo.
    ///
    /// The logo occupies a quarter of the image in each dimension.
    pub fn new(params: QrParams, logo: Option<&str>) -> Self {
        let image = logo.map(|src| {
            let side = f64::from(params.size) / 4.0;
            ImageSettings {
                src: src.to_string(),
                width: side,
                height: side,
                excavate: true,
            }
        });

        Self {
            value: params.url,
            size: params.size,
            level: params.level,
            fg_color: params.fg_color,
            bg_color: params.bg_color,
            margin: params.margin,
            image,
        }
    }
}
