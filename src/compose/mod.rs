//! Mockup compositing.
//!
//! A screenshot is cover-fitted into the frame's viewport, clipped to a
//! rounded rectangle, and placed on a transparent layer the size of the
//! frame. The frame is then alpha-composited over that layer, so the
//! screenshot only shows through where the frame is (partially)
//! transparent.

mod geometry;
mod mask;

pub use geometry::{compute_viewport, cover_crop, CoverCrop, InsetConfig, Viewport, ViewportRect};
pub use mask::{paste_masked, rounded_mask};

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::{debug, instrument};

use crate::error::{MockupError, Result};

/// Resample `screenshot` to exactly `width` x `height`, cropping overflow
/// evenly from both edges of the longer axis.
///
/// Uses Lanczos3 so downscaled screenshots do not alias.
pub fn cover_fit(screenshot: &RgbaImage, width: u32, height: u32) -> Result<RgbaImage> {
    let (sw, sh) = screenshot.dimensions();
    if sw == 0 || sh == 0 {
        return Err(MockupError::InvalidGeometry {
            reason: format!("screenshot has no area ({sw}x{sh})"),
        });
    }

    let crop = cover_crop(sw, sh, width, height);
    debug!(?crop, width, height, "Cover-fitting screenshot");

    let cropped = imageops::crop_imm(screenshot, crop.x, crop.y, crop.width, crop.height).to_image();
    if cropped.dimensions() == (width, height) {
        return Ok(cropped);
    }

    Ok(imageops::resize(&cropped, width, height, FilterType::Lanczos3))
}

/// Compose `screenshot` into `frame`.
///
/// The output has exactly the frame's dimensions. Fails with
/// `InvalidGeometry` when the insets leave no viewport or the screenshot is
/// empty.
#[instrument(level = "debug", skip_all, fields(frame = ?frame.dimensions(), screenshot = ?screenshot.dimensions()))]
pub fn compose_mockup(
    frame: &RgbaImage,
    screenshot: &RgbaImage,
    insets: &InsetConfig,
) -> Result<RgbaImage> {
    let (fw, fh) = frame.dimensions();
    let viewport = compute_viewport(fw, fh, insets)?;
    let rect = viewport.rect;

    let fitted = cover_fit(screenshot, rect.width(), rect.height())?;
    let mask = rounded_mask(rect.width(), rect.height(), viewport.radius);

    let mut composed = RgbaImage::new(fw, fh);
    paste_masked(&mut composed, &fitted, &mask, rect.left, rect.top);

    imageops::overlay(&mut composed, frame, 0, 0);

    debug!(?rect, radius = viewport.radius, "Composed mockup");
    Ok(composed)
}
