//! Mockup generation pipeline shared by the CLI and the HTTP server.
//!
//! Decoding and encoding happen at the edges; everything between works on
//! in-memory pixel buffers.

use image::{DynamicImage, GenericImageView};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::catalog::{detect_model, Catalog, DetectionResult, DeviceSpec};
use crate::compose::{compose_mockup, InsetConfig};
use crate::config::AppConfig;
use crate::error::{MockupError, Result};
use crate::frames::{FrameStore, Orientation};
use crate::image_ops;

/// Successful detection with the matched model's details.
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub detected_model: String,
    pub all_matches: Vec<String>,
    pub colors: Vec<String>,
    pub resolution: (u32, u32),
    pub series: String,
}

/// What to generate.
#[derive(Debug, Clone, Default)]
pub struct MockupRequest {
    /// Model name; detected from the screenshot when `None`.
    pub model: Option<String>,
    pub color: String,
    pub orientation: Orientation,
}

/// A composed mockup encoded as PNG.
#[derive(Debug, Clone)]
pub struct GeneratedMockup {
    pub model: String,
    pub color: String,
    pub orientation: Orientation,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl GeneratedMockup {
    /// Suggested download file name.
    pub fn file_name(&self) -> String {
        format!("mockup-{}-{}.png", self.model, self.color)
    }
}

/// Detects models and generates mockups against a frame store.
#[derive(Debug, Clone)]
pub struct MockupService {
    catalog: &'static Catalog,
    frames: FrameStore,
    insets: InsetConfig,
    prefer_series: String,
}

impl MockupService {
    pub fn new(frames: FrameStore, insets: InsetConfig, prefer_series: impl Into<String>) -> Self {
        Self {
            catalog: Catalog::builtin(),
            frames,
            insets,
            prefer_series: prefer_series.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            FrameStore::new(config.frames_dirs.iter().cloned()),
            config.insets,
            config.prefer_series.clone(),
        )
    }

    pub const fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub const fn frames(&self) -> &FrameStore {
        &self.frames
    }

    /// Run the detector without turning a miss into an error.
    pub fn detect_raw(&self, width: u32, height: u32) -> DetectionResult {
        detect_model(width, height, self.catalog, &self.prefer_series)
    }

    /// Detect the device model of `image`.
    ///
    /// Fails with `DetectionFailed` when no catalog entry matches.
    #[instrument(level = "debug", skip_all)]
    pub fn detect(&self, image: &DynamicImage) -> Result<Detection> {
        let (width, height) = image.dimensions();
        let result = self.detect_raw(width, height);

        let spec = result
            .best_match
            .as_deref()
            .and_then(|name| self.catalog.lookup(name))
            .ok_or(MockupError::DetectionFailed { width, height })?;

        info!(model = spec.name, width, height, "Detected model");
        Ok(Detection {
            detected_model: spec.name.to_string(),
            all_matches: result.all_matches,
            colors: spec.colors.iter().map(ToString::to_string).collect(),
            resolution: (width, height),
            series: spec.series.to_string(),
        })
    }

    /// Decode `bytes` and detect the device model.
    pub fn detect_bytes(&self, bytes: &[u8], file_name: Option<&str>) -> Result<Detection> {
        let image = image_ops::decode_bytes(bytes, file_name)?;
        self.detect(&image)
    }

    fn resolve_model(&self, screenshot: &DynamicImage, requested: Option<&str>) -> Result<&'static DeviceSpec> {
        match requested.map(str::trim).filter(|m| !m.is_empty()) {
            Some(name) => self.catalog.lookup(name).ok_or_else(|| MockupError::UnknownModel {
                model: name.to_string(),
            }),
            None => {
                let detection = self.detect(screenshot)?;
                self.catalog
                    .lookup(&detection.detected_model)
                    .ok_or(MockupError::UnknownModel {
                        model: detection.detected_model,
                    })
            }
        }
    }

    /// Compose `screenshot` into the requested frame and encode it as PNG.
    #[instrument(level = "debug", skip(self, screenshot), fields(model = ?request.model, color = %request.color))]
    pub fn generate(&self, screenshot: &DynamicImage, request: &MockupRequest) -> Result<GeneratedMockup> {
        let color = request.color.trim();
        if color.is_empty() {
            return Err(MockupError::MissingField { field: "color" });
        }

        let spec = self.resolve_model(screenshot, request.model.as_deref())?;
        self.catalog.validate_selection(spec.name, color)?;

        let frame = self.frames.load(spec.name, color, request.orientation)?;
        debug!(width = frame.width(), height = frame.height(), "Loaded frame");

        let composed = compose_mockup(&frame, &screenshot.to_rgba8(), &self.insets)?;
        let png = image_ops::encode_png(&composed)?;

        info!(
            model = spec.name,
            color,
            orientation = %request.orientation,
            bytes = png.len(),
            "Generated mockup"
        );

        Ok(GeneratedMockup {
            model: spec.name.to_string(),
            color: color.to_string(),
            orientation: request.orientation,
            width: composed.width(),
            height: composed.height(),
            png,
        })
    }

    /// Decode `bytes` and generate a mockup from them.
    pub fn generate_bytes(
        &self,
        bytes: &[u8],
        file_name: Option<&str>,
        request: &MockupRequest,
    ) -> Result<GeneratedMockup> {
        let screenshot = image_ops::decode_bytes(bytes, file_name)?;
        self.generate(&screenshot, request)
    }
}
