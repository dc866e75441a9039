//! Raster re-encoding: PNG in, flattened JPEG out

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, ImageFormat, Rgba, RgbaImage};

use super::QrError;

/// Opaque white, the background JPEG output is flattened onto
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Capability to decode, flatten and re-encode raster images.
pub trait RasterCodec {
    type Buffer;

    fn decode_png(&self, png: &[u8]) -> Result<Self::Buffer, QrError>;

    /// Composite `image` over a fully opaque canvas of `background` at (0, 0).
    ///
    /// The result has no transparent pixels.
    fn composite_over(&self, image: Self::Buffer, background: [u8; 3]) -> Self::Buffer;

    fn encode_jpeg(&self, image: &Self::Buffer, quality: u8) -> Result<Vec<u8>, QrError>;
}

/// Codec backed by the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl RasterCodec for ImageCodec {
    type Buffer = RgbaImage;

    fn decode_png(&self, png: &[u8]) -> Result<RgbaImage, QrError> {
        image::load_from_memory_with_format(png, ImageFormat::Png)
            .map(|decoded| decoded.to_rgba8())
            .map_err(QrError::Decode)
    }

    fn composite_over(&self, image: RgbaImage, background: [u8; 3]) -> RgbaImage {
        let [r, g, b] = background;
        let mut canvas = RgbaImage::from_pixel(image.width(), image.height(), Rgba([r, g, b, 255]));
        imageops::overlay(&mut canvas, &image, 0, 0);
        canvas
    }

    fn encode_jpeg(&self, image: &RgbaImage, quality: u8) -> Result<Vec<u8>, QrError> {
        // JPEG has no alpha channel
        let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, quality)
            .encode_image(&rgb)
            .map_err(QrError::Jpeg)?;
        Ok(jpeg)
    }
}
