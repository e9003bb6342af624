//! Configuration file loading.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, trace};

use super::path::resolve_path;
use super::schema::AppConfig;
use crate::error::{MockupError, Result};

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yaml, .yml).
    Yaml,
    /// TOML format (.toml).
    Toml,
}

impl ConfigFormat {
    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        trace!(extension = %ext, "Detecting config format from extension");
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Location of the user's config file, if one exists.
///
/// Looks for `config.toml`, `config.yaml` and `config.yml` under the
/// platform config directory's `mockup` folder.
pub fn default_config_path() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("mockup");
    ["config.toml", "config.yaml", "config.yml"]
        .into_iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Load and validate a configuration file.
///
/// Relative `frames_dirs` entries are resolved against the file's directory.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    info!("Loading configuration file");

    let format = ConfigFormat::from_extension(path).ok_or_else(|| {
        MockupError::ConfigParse(format!(
            "Unknown config format for '{}': expected .yaml, .yml, or .toml",
            path.display()
        ))
    })?;
    debug!(format = ?format, "Detected config format");

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MockupError::ConfigNotFound {
                path: path.display().to_string(),
            }
        } else {
            MockupError::Io(e)
        }
    })?;

    let mut config = load_config_from_str(&content, format)?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    config.frames_dirs = config
        .frames_dirs
        .iter()
        .map(|dir| resolve_path(dir, base_dir))
        .collect::<Result<_>>()?;

    Ok(config)
}

/// Parse and validate configuration text in a known format.
#[instrument(skip(content), fields(format = ?format, content_len = content.len()))]
pub fn load_config_from_str(content: &str, format: ConfigFormat) -> Result<AppConfig> {
    let config: AppConfig = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| MockupError::ConfigParse(format!("YAML: {e}")))?,
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| MockupError::ConfigParse(format!("TOML: {e}")))?
        }
    };

    config.validate()?;
    Ok(config)
}

impl AppConfig {
    /// Load configuration from `explicit`, or the default location, or fall
    /// back to built-in defaults.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return load_config(path);
        }

        match default_config_path() {
            Some(path) => load_config(path),
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}
