//! QR generation core
//!
//! Parses the generator query, derives download filenames and dispatches to
//! the requested output format. Symbol encoding and raster work sit behind
//! the `Encoder` and `RasterCodec` traits.

mod dispatch;
mod encoder;
mod error;
mod filename;
mod raster;
mod request;

pub use dispatch::{render, Attachment, Rendered};
pub use encoder::{Encoder, ErrorCorrection, QrEncoder};
pub use error::QrError;
pub use raster::{ImageCodec, RasterCodec};
pub use request::{OutputFormat, QrRequest};
