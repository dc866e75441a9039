//! Errors raised while producing a QR image

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QrError {
    /// The payload does not fit in any QR symbol
    #[error("failed to encode QR symbol: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("failed to render QR symbol as PNG: {0}")]
    Render(#[source] image::ImageError),
    #[error("failed to decode PNG: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to encode JPEG: {0}")]
    Jpeg(#[source] image::ImageError),
}
