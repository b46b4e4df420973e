//! DTOs for the QR endpoint.

use crate::domain::entities::{ErrorCorrection, QrParams};
use crate::error::AppError;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::sync::LazyLock;
use url::Url;
use validator::Validate;

/// `#RGB` or `#RRGGBB`.
static HEX_COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

fn default_size() -> u32 {
    600
}

fn default_fg_color() -> String {
    "#000000".to_string()
}

fn default_bg_color() -> String {
    "#FFFFFF".to_string()
}

fn default_margin() -> u32 {
    2
}

/// Query string of `GET /api/qr`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QrQuery {
    /// Value to encode. Short links get workspace-aware branding.
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Caller-supplied logo.
    #[validate(url(message = "Invalid logo URL"))]
    pub logo: Option<String>,

    /// Image side in pixels.
    #[serde(default = "default_size")]
    #[validate(range(min = 32, max = 4096))]
    pub size: u32,

    #[serde(default)]
    pub level: ErrorCorrection,

    #[serde(default = "default_fg_color")]
    pub fg_color: String,

    #[serde(default = "default_bg_color")]
    pub bg_color: String,

    /// Quiet zone in modules.
    #[serde(default = "default_margin")]
    #[validate(range(max = 32))]
    pub margin: u32,

    #[serde(default)]
    pub hide_logo: bool,
}

impl QrQuery {
    /// Validates the query and converts it into render parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on any invalid field.
    pub fn into_params(self) -> Result<QrParams, AppError> {
        self.validate()?;

        for (field, value) in [("fgColor", &self.fg_color), ("bgColor", &self.bg_color)] {
            if !HEX_COLOR_REGEX.is_match(value) {
                return Err(AppError::bad_request(
                    "Invalid colour, expected #RGB or #RRGGBB",
                    json!({ "field": field, "value": value }),
                ));
            }
        }

        let is_http =
            Url::parse(&self.url).is_ok_and(|url| matches!(url.scheme(), "http" | "https"));
        if !is_http {
            return Err(AppError::bad_request(
                "Only http and https URLs are supported",
                json!({ "field": "url" }),
            ));
        }

        Ok(QrParams {
            url: self.url,
            logo: self.logo,
            size: self.size,
            level: self.level,
            fg_color: self.fg_color,
            bg_color: self.bg_color,
            margin: self.margin,
            hide_logo: self.hide_logo,
        })
    }
}
