// Application state module
// Immutable per-process state shared by every connection

use super::types::Config;
use crate::qr::{ImageCodec, QrEncoder};

/// Application state
///
/// Built once at startup and shared behind an `Arc`. Nothing in here is
/// mutated by request handling.
pub struct AppState {
    pub config: Config,
    pub encoder: QrEncoder,
    pub codec: ImageCodec,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let encoder = QrEncoder::from_config(&config.qr);
        Self {
            config,
            encoder,
            codec: ImageCodec,
        }
    }
}
