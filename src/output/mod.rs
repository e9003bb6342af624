//! Output mode abstraction for robot and human output.

use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::catalog::Catalog;
use crate::cli::Cli;
use crate::error::MockupError;
use crate::frames::FrameStore;
use crate::service::{Detection, GeneratedMockup};

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

/// `{"models": {"<name>": {...}}}` with entries in catalog order.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct ModelsResponse<'a> {
    pub models: ModelMap<'a>,
}

impl<'a> ModelsResponse<'a> {
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self {
            models: ModelMap(catalog),
        }
    }
}

/// Catalog serialized as an object keyed by model name.
#[derive(Debug, Clone, Copy)]
pub struct ModelMap<'a>(pub &'a Catalog);

impl Serialize for ModelMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for spec in self.0 {
            map.serialize_entry(spec.name, spec)?;
        }
        map.end()
    }
}

/// Summary printed after a mockup is written.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GenerateSummary {
    pub model: String,
    pub color: String,
    pub orientation: String,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
    pub output: String,
}

impl GenerateSummary {
    pub fn new(mockup: &GeneratedMockup, output: &Path) -> Self {
        Self {
            model: mockup.model.clone(),
            color: mockup.color.clone(),
            orientation: mockup.orientation.to_string(),
            width: mockup.width,
            height: mockup.height,
            bytes: mockup.png.len(),
            output: output.display().to_string(),
        }
    }
}

/// JSON formatting options for robot mode.
#[derive(Debug, Clone, Copy)]
pub enum RobotFormat {
    /// Pretty-printed JSON (default for --robot).
    Json,
    /// Single-line JSON (--format=json-compact).
    JsonCompact,
}

/// Determines how command output is rendered.
#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    /// JSON output for agents and scripting.
    Robot(RobotFormat),
    /// Styled terminal output.
    Human { color: bool },
}

impl OutputMode {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.use_json() {
            let format = if cli.use_compact_json() {
                RobotFormat::JsonCompact
            } else {
                RobotFormat::Json
            };
            Self::Robot(format)
        } else {
            Self::Human {
                color: !cli.no_color && console::colors_enabled(),
            }
        }
    }

    pub const fn is_robot(&self) -> bool {
        matches!(self, Self::Robot(_))
    }

    pub fn into_output(self) -> Box<dyn Output> {
        match self {
            Self::Robot(format) => Box::new(RobotOutput::new(format)),
            Self::Human { color } => Box::new(HumanOutput::new(color)),
        }
    }
}

/// Commands call these without knowing the output mode.
pub trait Output {
    fn error(&self, error: &MockupError);
    fn models(&self, catalog: &Catalog, frames: &FrameStore, long: bool);
    fn detection(&self, detection: &Detection);
    fn generated(&self, summary: &GenerateSummary);
    fn serving(&self, addr: &str);
    fn version_info(&self, version: &str);
}
