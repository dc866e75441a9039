// Configuration module entry point
// Loads application configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;
use thiserror::Error;

// Re-export public types
pub use state::AppState;
pub use types::{Config, QrConfig};

/// Default config file name (extension resolved by the `config` crate)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid listen address '{addr}': {source}")]
    Address {
        addr: String,
        source: std::net::AddrParseError,
    },
    #[error("qr.jpeg_quality must be between 1 and 100, got {0}")]
    JpegQuality(u8),
    #[error("qr.size must be greater than zero")]
    QrSize,
    #[error("qr.path must start with '/', got '{0}'")]
    QrPath(String),
}

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional. Environment variables prefixed with `QRGEN`
    /// override it, using `__` between sections, e.g. `QRGEN_SERVER__PORT=9000`.
    pub fn load_from(config_path: &str) -> Result<Self, SettingsError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("QRGEN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "qrgen-server")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB, GET-only endpoint
            .set_default("qr.path", "/")?
            .set_default("qr.size", 300)?
            .set_default("qr.quiet_zone", true)?
            .set_default("qr.error_correction", "L")?
            .set_default("qr.transparent_background", false)?
            .set_default("qr.jpeg_quality", 90)?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that deserialize fine but cannot be served
    fn validate(&self) -> Result<(), SettingsError> {
        self.get_socket_addr()?;
        if !(1..=100).contains(&self.qr.jpeg_quality) {
            return Err(SettingsError::JpegQuality(self.qr.jpeg_quality));
        }
        if self.qr.size == 0 {
            return Err(SettingsError::QrSize);
        }
        if !self.qr.path.starts_with('/') {
            return Err(SettingsError::QrPath(self.qr.path.clone()));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| SettingsError::Address { addr, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::LogLevel;
    use crate::qr::ErrorCorrection;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.logging.level, LogLevel::Info);
        assert_eq!(cfg.qr.path, "/");
        assert_eq!(cfg.qr.jpeg_quality, 90);
        assert_eq!(cfg.qr.error_correction, ErrorCorrection::L);
        assert!(cfg.routes.health.enabled);
        assert_eq!(cfg.routes.favicon_paths.len(), 2);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_host_rejected() {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(SettingsError::Address { .. })
        ));
    }

    #[test]
    fn test_validate_quality_and_path() {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.qr.jpeg_quality = 0;
        assert!(matches!(cfg.validate(), Err(SettingsError::JpegQuality(0))));

        cfg.qr.jpeg_quality = 90;
        cfg.qr.path = "qr".to_string();
        assert!(matches!(cfg.validate(), Err(SettingsError::QrPath(_))));

        cfg.qr.path = "/qr".to_string();
        cfg.qr.size = 0;
        assert!(matches!(cfg.validate(), Err(SettingsError::QrSize)));
    }
}
