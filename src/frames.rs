//! Frame asset lookup.
//!
//! A frame for model `M`, color `C` and orientation `O` lives at
//! `<root>/<M>/<M> - <C> - <O>.png`. Several roots may be configured; they
//! are searched in order and the first existing file wins.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{MockupError, Result};
use crate::image_ops;

/// Device orientation of a frame asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "Portrait",
            Self::Landscape => "Landscape",
        }
    }

    /// Parse the form used in asset names and API requests.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Portrait" | "portrait" => Some(Self::Portrait),
            "Landscape" | "landscape" => Some(Self::Landscape),
            _ => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File name of the frame asset for a model, color and orientation.
pub fn frame_file_name(model: &str, color: &str, orientation: Orientation) -> String {
    format!("{model} - {color} - {orientation}.png")
}

/// Frame assets stored on disk under one or more root directories.
#[derive(Debug, Clone)]
pub struct FrameStore {
    roots: Vec<PathBuf>,
}

impl FrameStore {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Locate a frame file. A missing model directory or file is `None`.
    pub fn find(&self, model: &str, color: &str, orientation: Orientation) -> Option<PathBuf> {
        let file_name = frame_file_name(model, color, orientation);

        self.roots.iter().find_map(|root| {
            let model_dir = root.join(model);
            if !model_dir.is_dir() {
                trace!(dir = %model_dir.display(), "No model directory");
                return None;
            }

            let path = model_dir.join(&file_name);
            if path.is_file() {
                debug!(path = %path.display(), "Found frame");
                Some(path)
            } else {
                trace!(path = %path.display(), "No frame file");
                None
            }
        })
    }

    /// Load a frame as RGBA.
    ///
    /// Fails with `FrameAssetMissing` when no root has the asset.
    pub fn load(&self, model: &str, color: &str, orientation: Orientation) -> Result<RgbaImage> {
        let path = self
            .find(model, color, orientation)
            .ok_or_else(|| MockupError::FrameAssetMissing {
                model: model.to_string(),
                color: color.to_string(),
                orientation: orientation.to_string(),
            })?;

        load_frame_file(&path)
    }

    /// List the `(color, orientation)` pairs available for a model.
    pub fn available(&self, model: &str, colors: &[&str]) -> Vec<(String, Orientation)> {
        colors
            .iter()
            .flat_map(|color| {
                [Orientation::Portrait, Orientation::Landscape]
                    .into_iter()
                    .filter(move |o| self.find(model, color, *o).is_some())
                    .map(move |o| ((*color).to_string(), o))
            })
            .collect()
    }
}

fn load_frame_file(path: &Path) -> Result<RgbaImage> {
    Ok(image_ops::load_image(path)?.to_rgba8())
}
