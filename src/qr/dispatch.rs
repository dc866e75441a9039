//! Format dispatch
//!
//! Decides what a request produces: the preview page payload or a download
//! in one of the three output formats.

use super::filename::derive_filename_base;
use super::raster::WHITE;
use super::{Encoder, OutputFormat, QrError, QrRequest, RasterCodec};
use crate::logger;

/// A file to be sent as `Content-Disposition: attachment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub format: OutputFormat,
    /// Full filename including extension
    pub filename: String,
    pub body: Vec<u8>,
}

impl Attachment {
    fn new(format: OutputFormat, base: &str, body: Vec<u8>) -> Self {
        Self {
            format,
            filename: format!("{base}.{}", format.extension()),
            body,
        }
    }

    pub const fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Outcome of a generator request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// HTML page; `preview_png` is set when `data` was supplied
    Page { preview_png: Option<Vec<u8>> },
    Download(Attachment),
}

/// Produce the output for one request.
///
/// Only encoder failures are returned as errors. A JPEG conversion that
/// fails degrades to the PNG rendering.
pub fn render<E, C>(
    request: &QrRequest,
    encoder: &E,
    codec: &C,
    jpeg_quality: u8,
) -> Result<Rendered, QrError>
where
    E: Encoder,
    C: RasterCodec,
{
    let Some(data) = request.data.as_deref() else {
        return Ok(Rendered::Page { preview_png: None });
    };

    let symbol = encoder.encode(data)?;
    let png = encoder.render_png(&symbol)?;

    if !request.wants_download() {
        return Ok(Rendered::Page {
            preview_png: Some(png),
        });
    }

    let base = derive_filename_base(data);
    let attachment = match request.format {
        OutputFormat::Svg => {
            Attachment::new(OutputFormat::Svg, &base, encoder.render_svg(&symbol).into_bytes())
        }
        OutputFormat::Png => Attachment::new(OutputFormat::Png, &base, png),
        OutputFormat::Jpeg => match flatten_to_jpeg(codec, &png, jpeg_quality) {
            Ok(jpeg) => Attachment::new(OutputFormat::Jpeg, &base, jpeg),
            Err(e) => {
                logger::log_warning(&format!("JPEG conversion failed, serving PNG: {e}"));
                Attachment::new(OutputFormat::Png, &base, png)
            }
        },
    };

    Ok(Rendered::Download(attachment))
}

/// Decode `png`, composite it over opaque white and encode as JPEG
fn flatten_to_jpeg<C: RasterCodec>(codec: &C, png: &[u8], quality: u8) -> Result<Vec<u8>, QrError> {
    let decoded = codec.decode_png(png)?;
    let flat = codec.composite_over(decoded, WHITE);
    codec.encode_jpeg(&flat, quality)
}
