//! Catalog of supported devices.
//!
//! The catalog is an ordered, immutable table. Iteration order matters: the
//! detector breaks ties by taking the first candidate it meets, so entries
//! are kept in a `Vec` rather than a map.

mod detect;

pub use detect::{DEFAULT_PREFERRED_SERIES, DetectionResult, MatchTier, detect_model};

use std::sync::LazyLock;

use serde::Serialize;

use crate::error::{MockupError, Result};

/// Specification of a single device model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceSpec {
    /// Unique model name, e.g. "iPhone 16 Pro".
    pub name: &'static str,
    /// Screen resolution (width, height) in portrait orientation.
    #[serde(rename = "resolution")]
    pub portrait_resolution: (u32, u32),
    /// Available frame colors, in display order.
    pub colors: &'static [&'static str],
    /// Model generation, used to break detection ties.
    pub series: &'static str,
}

impl DeviceSpec {
    /// Returns true if `color` is one of this model's frame colors.
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.contains(&color)
    }

    /// Height over width of the portrait resolution.
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = self.portrait_resolution;
        f64::from(h) / f64::from(w)
    }
}

/// Ordered table of device specifications.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<DeviceSpec>,
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog::new(builtin_entries()));

const IPHONE_16_COLORS: &[&str] = &["Black", "Pink", "Teal", "Ultramarine", "White"];
const IPHONE_16_PRO_COLORS: &[&str] = &[
    "Black Titanium",
    "Desert Titanium",
    "Natural Titanium",
    "White Titanium",
];
const IPHONE_17_COLORS: &[&str] = &["Black", "Lavender", "Mist Blue", "Sage", "White"];
const IPHONE_AIR_COLORS: &[&str] = &[
    "Cloud White",
    "Light Gold",
    "Midnight",
    "Natural Silver",
    "Starlight",
];
const IPHONE_17_PRO_COLORS: &[&str] = &[
    "Cosmic Orange",
    "Deep Blue",
    "Midnight Titanium",
    "Sahara Gold",
];

fn builtin_entries() -> Vec<DeviceSpec> {
    let spec = |name, w, h, colors, series| DeviceSpec {
        name,
        portrait_resolution: (w, h),
        colors,
        series,
    };

    vec![
        spec("iPhone 16", 1179, 2556, IPHONE_16_COLORS, "16"),
        spec("iPhone 16 Plus", 1290, 2796, IPHONE_16_COLORS, "16"),
        spec("iPhone 16 Pro", 1206, 2622, IPHONE_16_PRO_COLORS, "16"),
        spec("iPhone 16 Pro Max", 1320, 2868, IPHONE_16_PRO_COLORS, "16"),
        spec("iPhone 17", 1206, 2622, IPHONE_17_COLORS, "17"),
        spec("iPhone Air", 1242, 2700, IPHONE_AIR_COLORS, "17"),
        spec("iPhone 17 Pro", 1206, 2622, IPHONE_17_PRO_COLORS, "17"),
        spec("iPhone 17 Pro Max", 1320, 2868, IPHONE_17_PRO_COLORS, "17"),
    ]
}

impl Catalog {
    /// Build a catalog from entries, keeping their order.
    pub const fn new(entries: Vec<DeviceSpec>) -> Self {
        Self { entries }
    }

    /// The process-wide built-in catalog.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Find a model by exact name.
    pub fn lookup(&self, name: &str) -> Option<&DeviceSpec> {
        self.entries.iter().find(|spec| spec.name == name)
    }

    /// Iterate entries in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, DeviceSpec> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check a model/color pair chosen by a caller.
    ///
    /// Returns the model's spec, or `UnknownModel` / `UnknownColor`.
    pub fn validate_selection(&self, model: &str, color: &str) -> Result<&DeviceSpec> {
        let spec = self.lookup(model).ok_or_else(|| MockupError::UnknownModel {
            model: model.to_string(),
        })?;

        if !spec.has_color(color) {
            return Err(MockupError::UnknownColor {
                model: model.to_string(),
                color: color.to_string(),
                available: spec.colors.iter().map(ToString::to_string).collect(),
            });
        }

        Ok(spec)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a DeviceSpec;
    type IntoIter = std::slice::Iter<'a, DeviceSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
