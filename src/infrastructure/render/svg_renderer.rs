//! SVG QR renderer backed by the `qrcode` crate.
//!
//! `qrcode` only provides the module matrix; the SVG is assembled here so the
//! logo area can be excavated before the dark modules are emitted.

use qrcode::{Color, EcLevel, QrCode};
use qrcode::types::QrError;

use crate::domain::entities::{ErrorCorrection, ImageSettings, RenderRequest};
use crate::domain::{QrRenderer, RenderError, RenderedImage};

/// Renders QR codes as standalone SVG documents.
///
/// The drawing uses a viewBox in module units (`modules + 2 * margin`) scaled
/// to `size` pixels, a background rectangle, and one path of dark modules.
#[derive(Debug, Clone, Default)]
pub struct SvgQrRenderer;

impl SvgQrRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl QrRenderer for SvgQrRenderer {
    fn render(&self, request: &RenderRequest) -> Result<RenderedImage, RenderError> {
        let code = QrCode::with_error_correction_level(request.value.as_bytes(), ec_level(request.level))
            .map_err(|e| match e {
                QrError::DataTooLong => RenderError::DataTooLong,
                other => RenderError::Encoding(other.to_string()),
            })?;

        let width = code.width();
        let mut cells: Vec<Vec<bool>> = code
            .to_colors()
            .chunks(width)
            .map(|row| row.iter().map(|c| *c == Color::Dark).collect())
            .collect();

        let margin = request.margin as usize;
        let num_cells = width + 2 * margin;

        let placement = request
            .image
            .as_ref()
            .map(|image| LogoPlacement::new(image, width, num_cells, request.size));

        if let Some(placement) = &placement
            && placement.excavate
        {
            excavate(&mut cells, placement);
        }

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{size}" height="{size}" viewBox="0 0 {n} {n}" shape-rendering="crispEdges">"#,
            size = request.size,
            n = num_cells,
        );
        svg.push_str(&format!(
            r#"<path fill="{}" d="M0,0 h{n}v{n}H0z"/>"#,
            escape_attr(&request.bg_color),
            n = num_cells,
        ));
        svg.push_str(&format!(
            r#"<path fill="{}" d="{}"/>"#,
            escape_attr(&request.fg_color),
            module_path(&cells, margin),
        ));

        if let (Some(placement), Some(image)) = (&placement, &request.image) {
            let src = escape_attr(&image.src);
            svg.push_str(&format!(
                r#"<image href="{src}" xlink:href="{src}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none"/>"#,
                placement.x + margin as f64,
                placement.y + margin as f64,
                placement.width,
                placement.height,
            ));
        }

        svg.push_str("</svg>");

        Ok(RenderedImage {
            content_type: "image/svg+xml",
            body: svg.into_bytes(),
        })
    }
}

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::L => EcLevel::L,
        ErrorCorrection::M => EcLevel::M,
        ErrorCorrection::Q => EcLevel::Q,
        ErrorCorrection::H => EcLevel::H,
    }
}

/// Logo rectangle in module units, relative to the top-left module (margin excluded).
#[derive(Debug, Clone, PartialEq)]
struct LogoPlacement {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    excavate: bool,
}

impl LogoPlacement {
    fn new(image: &ImageSettings, modules: usize, num_cells: usize, size: u32) -> Self {
        let scale = num_cells as f64 / f64::from(size);
        let width = image.width * scale;
        let height = image.height * scale;
        let center = modules as f64 / 2.0;

        Self {
            x: center - width / 2.0,
            y: center - height / 2.0,
            width,
            height,
            excavate: image.excavate,
        }
    }
}

/// Clears every module touched by the logo rectangle.
fn excavate(cells: &mut [Vec<bool>], placement: &LogoPlacement) {
    let floor_x = placement.x.floor();
    let floor_y = placement.y.floor();
    let span_x = (placement.width + placement.x - floor_x).ceil();
    let span_y = (placement.height + placement.y - floor_y).ceil();

    let x0 = floor_x.max(0.0) as usize;
    let y0 = floor_y.max(0.0) as usize;
    let x1 = (floor_x + span_x).max(0.0) as usize;
    let y1 = (floor_y + span_y).max(0.0) as usize;

    for row in cells.iter_mut().take(y1).skip(y0) {
        let end = x1.min(row.len());
        if x0 < end {
            row[x0..end].fill(false);
        }
    }
}

/// Builds one path of horizontal runs of dark modules.
fn module_path(cells: &[Vec<bool>], margin: usize) -> String {
    let mut d = String::new();

    for (y, row) in cells.iter().enumerate() {
        let mut x = 0;
        while x < row.len() {
            if !row[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < row.len() && row[x] {
                x += 1;
            }
            d.push_str(&format!(
                "M{} {}h{}v1H{}z",
                start + margin,
                y + margin,
                x - start,
                start + margin
            ));
        }
    }

    d
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
