//! Viewport and cover-crop geometry.
//!
//! Pixel boundaries are computed with `f64::round`, which rounds half away
//! from zero.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{MockupError, Result};

/// Inset and corner radius configuration for the screen viewport.
///
/// Horizontal insets are fractions of the frame width, vertical insets are
/// fractions of the frame height, and the radius is a fraction of the
/// viewport's shorter side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsetConfig {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub radius: f64,
}

impl Default for InsetConfig {
    fn default() -> Self {
        Self {
            left: 0.05,
            right: 0.05,
            top: 0.025,
            bottom: 0.025,
            radius: 0.10,
        }
    }
}

impl InsetConfig {
    /// Check that every fraction is usable.
    ///
    /// Insets must be finite and non-negative; the radius must be finite
    /// (negative radii clamp to square corners).
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("left", self.left),
            ("right", self.right),
            ("top", self.top),
            ("bottom", self.bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MockupError::InvalidGeometry {
                    reason: format!("{name} inset must be a non-negative fraction, got {value}"),
                });
            }
        }

        if !self.radius.is_finite() {
            return Err(MockupError::InvalidGeometry {
                reason: format!("radius must be finite, got {}", self.radius),
            });
        }

        Ok(())
    }
}

/// Pixel rectangle inside a frame. `right > left` and `bottom > top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewportRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl ViewportRect {
    pub const fn width(&self) -> u32 {
        self.right - self.left
    }

    pub const fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Screen area of a frame together with its corner radius in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub rect: ViewportRect,
    pub radius: u32,
}

fn scaled(extent: u32, fraction: f64) -> i64 {
    (f64::from(extent) * fraction).round() as i64
}

/// Compute the viewport for a `frame_width` x `frame_height` frame.
///
/// Fails with `InvalidGeometry` when the insets leave no positive area.
pub fn compute_viewport(frame_width: u32, frame_height: u32, insets: &InsetConfig) -> Result<Viewport> {
    insets.validate()?;

    let fw = i64::from(frame_width);
    let fh = i64::from(frame_height);

    let left = scaled(frame_width, insets.left);
    let right = fw - scaled(frame_width, insets.right);
    let top = scaled(frame_height, insets.top);
    let bottom = fh - scaled(frame_height, insets.bottom);

    let width = right - left;
    let height = bottom - top;
    if width <= 0 || height <= 0 {
        return Err(MockupError::InvalidGeometry {
            reason: format!(
                "viewport has non-positive size {width}x{height} in a {frame_width}x{frame_height} frame"
            ),
        });
    }

    // Insets are non-negative, so every edge lies within the frame.
    let rect = ViewportRect {
        left: left as u32,
        top: top as u32,
        right: right as u32,
        bottom: bottom as u32,
    };

    let short_side = width.min(height);
    let radius = scaled(short_side as u32, insets.radius).clamp(0, short_side / 2) as u32;

    trace!(?rect, radius, "Computed viewport");
    Ok(Viewport { rect, radius })
}

/// Source rectangle cropped out of a screenshot before resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoverCrop {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Largest centered region of a `src_width` x `src_height` image with the
/// aspect ratio of the target.
///
/// Scaling that region to the target size covers it completely with no
/// letterboxing; the overflow is split evenly between opposite edges.
/// All dimensions must be non-zero.
pub fn cover_crop(src_width: u32, src_height: u32, dst_width: u32, dst_height: u32) -> CoverCrop {
    let (sw, sh) = (u64::from(src_width), u64::from(src_height));
    let (dw, dh) = (u64::from(dst_width), u64::from(dst_height));

    // Compare sw/sh against dw/dh without floating point.
    let (width, height) = match (sw * dh).cmp(&(dw * sh)) {
        std::cmp::Ordering::Equal => (src_width, src_height),
        std::cmp::Ordering::Greater => {
            let w = (f64::from(src_height) * f64::from(dst_width) / f64::from(dst_height)).round();
            ((w as u32).clamp(1, src_width), src_height)
        }
        std::cmp::Ordering::Less => {
            let h = (f64::from(src_width) * f64::from(dst_height) / f64::from(dst_width)).round();
            (src_width, (h as u32).clamp(1, src_height))
        }
    };

    CoverCrop {
        x: (src_width - width) / 2,
        y: (src_height - height) / 2,
        width,
        height,
    }
}
