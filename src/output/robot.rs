//! Robot mode JSON output.

use serde::Serialize;
use tracing::{debug, error, instrument, trace};

use crate::catalog::Catalog;
use crate::error::MockupError;
use crate::frames::FrameStore;
use crate::service::Detection;

use super::{GenerateSummary, ModelsResponse, Output, RobotFormat};

/// Error document written to stderr in robot mode.
#[derive(Debug, Serialize)]
pub struct ErrorDocument {
    pub error: bool,
    pub message: String,
    pub suggestion: Option<&'static str>,
    pub recoverable: bool,
}

impl From<&MockupError> for ErrorDocument {
    fn from(err: &MockupError) -> Self {
        Self {
            error: true,
            message: err.to_string(),
            suggestion: err.suggestion(),
            recoverable: err.is_user_recoverable(),
        }
    }
}

/// JSON output for agents and scripting.
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    #[instrument]
    pub fn new(format: RobotFormat) -> Self {
        debug!(?format, "Creating RobotOutput");
        Self { format }
    }

    /// Serialize `data` in this output's format.
    pub fn render<T: Serialize + ?Sized>(&self, data: &T) -> serde_json::Result<String> {
        match self.format {
            RobotFormat::Json => serde_json::to_string_pretty(data),
            RobotFormat::JsonCompact => serde_json::to_string(data),
        }
    }

    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        match self.render(data) {
            Ok(json) => {
                trace!(json_len = json.len(), "JSON serialized");
                println!("{json}");
            }
            Err(e) => error!(error = %e, "Failed to serialize output"),
        }
    }
}

impl Output for RobotOutput {
    fn error(&self, err: &MockupError) {
        match serde_json::to_string_pretty(&ErrorDocument::from(err)) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => error!(error = %e, "Failed to serialize error"),
        }
    }

    fn models(&self, catalog: &Catalog, _frames: &FrameStore, _long: bool) {
        self.output_json(&ModelsResponse::new(catalog));
    }

    fn detection(&self, detection: &Detection) {
        self.output_json(detection);
    }

    fn generated(&self, summary: &GenerateSummary) {
        self.output_json(summary);
    }

    fn serving(&self, addr: &str) {
        self.output_json(&serde_json::json!({ "serving": true, "address": addr }));
    }

    fn version_info(&self, version: &str) {
        self.output_json(&serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": version,
        }));
    }
}
