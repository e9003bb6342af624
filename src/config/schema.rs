//! Configuration data types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::DEFAULT_PREFERRED_SERIES;
use crate::compose::InsetConfig;
use crate::error::{MockupError, Result};

/// Top-level configuration.
///
/// # Example TOML
///
/// ```toml
/// prefer_series = "17"
/// frames_dirs = ["frames", "~/mockup/frames"]
///
/// [insets]
/// left = 0.05
/// radius = 0.12
///
/// [server]
/// port = 8000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Series preferred when detection finds equally good matches.
    pub prefer_series: String,

    /// Directories searched, in order, for frame assets.
    ///
    /// Relative entries resolve against the config file's directory.
    pub frames_dirs: Vec<PathBuf>,

    /// Viewport insets and corner radius used when composing.
    pub insets: InsetConfig,

    /// HTTP server settings.
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            prefer_series: DEFAULT_PREFERRED_SERIES.to_string(),
            frames_dirs: vec![PathBuf::from("frames"), PathBuf::from("public/frames")],
            insets: InsetConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Validate the configuration.
    ///
    /// Checks that:
    /// - Inset fractions are finite and non-negative
    /// - At least one frames directory is configured
    /// - The preferred series is not blank
    /// - The server port is non-zero
    pub fn validate(&self) -> Result<()> {
        self.insets
            .validate()
            .map_err(|e| MockupError::ConfigInvalid(format!("insets: {e}")))?;

        if self.frames_dirs.is_empty() {
            return Err(MockupError::ConfigInvalid(
                "frames_dirs must list at least one directory".to_string(),
            ));
        }

        if self.prefer_series.trim().is_empty() {
            return Err(MockupError::ConfigInvalid(
                "prefer_series must not be empty".to_string(),
            ));
        }

        self.server.validate()?;

        debug!(
            frames_dirs = self.frames_dirs.len(),
            prefer_series = %self.prefer_series,
            "Configuration validated"
        );
        Ok(())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
    /// Origins allowed by CORS. Empty disables cross-origin access.
    pub cors_origins: Vec<String>,
    /// Largest accepted request body in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: vec!["http://localhost:3000".to_string()],
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(MockupError::ConfigInvalid(
                "server.port must be non-zero".to_string(),
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(MockupError::ConfigInvalid(
                "server.max_upload_bytes must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port` string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
