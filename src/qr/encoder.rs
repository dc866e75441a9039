//! QR symbol encoding and rendering

use image::{ImageFormat, Rgba};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use serde::Deserialize;
use std::io::Cursor;

use super::QrError;
use crate::config::QrConfig;

/// Capability to turn text into a QR symbol and render it.
///
/// The symbol type is left to the implementation so tests can substitute a
/// fake without touching real image encoding.
pub trait Encoder {
    type Symbol;

    fn encode(&self, text: &str) -> Result<Self::Symbol, QrError>;

    /// Render the symbol as PNG bytes
    fn render_png(&self, symbol: &Self::Symbol) -> Result<Vec<u8>, QrError>;

    /// Render the symbol as SVG markup
    fn render_svg(&self, symbol: &Self::Symbol) -> String;
}

/// Error correction level, as written in configuration
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCorrection {
    #[serde(alias = "l", alias = "low")]
    L,
    #[serde(alias = "m", alias = "medium")]
    M,
    #[serde(alias = "q", alias = "quartile")]
    Q,
    #[serde(alias = "h", alias = "high")]
    H,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => Self::L,
            ErrorCorrection::M => Self::M,
            ErrorCorrection::Q => Self::Q,
            ErrorCorrection::H => Self::H,
        }
    }
}

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);
const LIGHT_TRANSPARENT: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Encoder backed by the `qrcode` crate
#[derive(Debug, Clone)]
pub struct QrEncoder {
    size: u32,
    quiet_zone: bool,
    ec_level: EcLevel,
    transparent_background: bool,
}

impl QrEncoder {
    pub fn from_config(config: &QrConfig) -> Self {
        Self {
            size: config.size,
            quiet_zone: config.quiet_zone,
            ec_level: config.error_correction.into(),
            transparent_background: config.transparent_background,
        }
    }
}

impl Encoder for QrEncoder {
    type Symbol = QrCode;

    fn encode(&self, text: &str) -> Result<QrCode, QrError> {
        Ok(QrCode::with_error_correction_level(text.as_bytes(), self.ec_level)?)
    }

    fn render_png(&self, symbol: &QrCode) -> Result<Vec<u8>, QrError> {
        let light = if self.transparent_background {
            LIGHT_TRANSPARENT
        } else {
            LIGHT
        };
        let image = symbol
            .render::<Rgba<u8>>()
            .min_dimensions(self.size, self.size)
            .quiet_zone(self.quiet_zone)
            .dark_color(DARK)
            .light_color(light)
            .build();

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(QrError::Render)?;
        Ok(png)
    }

    fn render_svg(&self, symbol: &QrCode) -> String {
        symbol
            .render::<svg::Color<'_>>()
            .min_dimensions(self.size, self.size)
            .quiet_zone(self.quiet_zone)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn encoder() -> QrEncoder {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        QrEncoder::from_config(&cfg.qr)
    }

    #[test]
    fn test_png_is_decodable_and_sized() {
        let encoder = encoder();
        let symbol = encoder.encode("https://example.com").unwrap();
        let png = encoder.render_png(&symbol).unwrap();

        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
        assert!(decoded.width() >= 300);
        assert_eq!(decoded.width(), decoded.height());
    }

    #[test]
    fn test_png_is_deterministic() {
        let encoder = encoder();
        let first = encoder.render_png(&encoder.encode("same").unwrap()).unwrap();
        let second = encoder.render_png(&encoder.encode("same").unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_svg_markup() {
        let encoder = encoder();
        let svg = encoder.render_svg(&encoder.encode("hello").unwrap());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#000000"));
    }

    #[test]
    fn test_transparent_background() {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.qr.transparent_background = true;
        let encoder = QrEncoder::from_config(&cfg.qr);
        let png = encoder.render_png(&encoder.encode("hello").unwrap()).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        // Quiet zone corner is a light module
        assert_eq!(decoded.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_oversized_payload_fails() {
        let encoder = encoder();
        let payload = "x".repeat(8000);
        assert!(matches!(encoder.encode(&payload), Err(QrError::Encode(_))));
    }
}
