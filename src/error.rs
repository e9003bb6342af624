//! Error types for mockup operations.

use thiserror::Error;

/// Primary error type for mockup operations.
#[derive(Error, Debug)]
pub enum MockupError {
    // Geometry errors
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    // Detection / selection errors
    #[error("Could not detect device model for a {width}x{height} image")]
    DetectionFailed { width: u32, height: u32 },

    #[error("Invalid model: {model}")]
    UnknownModel { model: String },

    #[error("Invalid color '{color}' for {model}. Available: {available:?}")]
    UnknownColor {
        model: String,
        color: String,
        available: Vec<String>,
    },

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Asset errors
    #[error("Frame not found: {model} - {color} - {orientation}")]
    FrameAssetMissing {
        model: String,
        color: String,
        orientation: String,
    },

    // Image errors
    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),

    #[error("Failed to encode image: {0}")]
    EncodeFailure(String),

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    // Web server errors
    #[error("Web server failed on {addr}: {reason}")]
    WebServerFailed { addr: String, reason: String },

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl MockupError {
    /// Returns true if the error is caused by caller input rather than a fault.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidGeometry { .. }
                | Self::DetectionFailed { .. }
                | Self::UnknownModel { .. }
                | Self::UnknownColor { .. }
                | Self::MissingField { .. }
                | Self::InvalidRequest(_)
                | Self::FrameAssetMissing { .. }
                | Self::DecodeFailure(_)
                | Self::ConfigNotFound { .. }
                | Self::ConfigInvalid(_)
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::DetectionFailed { .. } => Some(
                "Ensure the screenshot matches iPhone 16 or 17 series dimensions, or pass --model",
            ),
            Self::UnknownModel { .. } => Some("Run: mockup models"),
            Self::UnknownColor { .. } => Some("Run: mockup models --long"),
            Self::FrameAssetMissing { .. } => {
                Some("Check --frames-dir points at a directory with one sub-directory per model")
            }
            Self::DecodeFailure(msg) if is_heic_message(msg) => {
                Some("Convert HEIC/HEIF screenshots to PNG or JPEG first")
            }
            Self::InvalidGeometry { reason } => Some(geometry_hint(reason)),
            Self::ConfigNotFound { .. } => Some("Check the --config path or MOCKUP_CONFIG"),
            _ => None,
        }
    }
}

fn is_heic_message(msg: &str) -> bool {
    msg.contains("HEIC")
}

fn geometry_hint(reason: &str) -> &'static str {
    if reason.starts_with("screenshot") {
        "Use a screenshot with non-zero width and height"
    } else if reason.starts_with("viewport") {
        "Insets on each axis must sum to less than 1.0"
    } else {
        "Insets must be finite non-negative fractions, and the radius finite"
    }
}

/// Convenience type alias for Results using MockupError.
pub type Result<T> = std::result::Result<T, MockupError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| MockupError::Other(format!("{}: {e}", f().into())))
    }
}
