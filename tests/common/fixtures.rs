//! Test fixture helpers for creating temporary test data.
//!
//! Frames are small synthetic PNGs: an opaque bezel with a fully
//! transparent rectangle where the default insets place the viewport.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use mockup::compose::{compute_viewport, InsetConfig};
use mockup::frames::{frame_file_name, FrameStore, Orientation};
use tempfile::TempDir;

pub const BEZEL: Rgba<u8> = Rgba([25, 25, 25, 255]);
pub const SCREEN: Rgb<u8> = Rgb([0, 140, 255]);

/// Frame size used for portrait fixtures.
pub const FRAME_SIZE: (u32, u32) = (200, 400);

/// Opaque frame with a transparent cutout matching the default viewport.
pub fn frame_image(width: u32, height: u32) -> RgbaImage {
    let viewport = compute_viewport(width, height, &InsetConfig::default())
        .unwrap_or_else(|e| panic!("fixture frame {width}x{height} has no viewport: {e}"));
    let rect = viewport.rect;

    RgbaImage::from_fn(width, height, |x, y| {
        let inside = x >= rect.left && x < rect.right && y >= rect.top && y < rect.bottom;
        if inside { Rgba([0, 0, 0, 0]) } else { BEZEL }
    })
}

/// Frame assets in a temporary directory with automatic cleanup.
///
/// # Example
///
/// ```ignore
/// let frames = TestFrames::new()
///     .with("iPhone 17", "Sage", Orientation::Portrait);
/// let store = frames.store();
/// ```
pub struct TestFrames {
    pub dir: TempDir,
}

impl Default for TestFrames {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFrames {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a frame for `model`/`color`/`orientation`.
    #[must_use]
    pub fn with(self, model: &str, color: &str, orientation: Orientation) -> Self {
        let (w, h) = match orientation {
            Orientation::Portrait => FRAME_SIZE,
            Orientation::Landscape => (FRAME_SIZE.1, FRAME_SIZE.0),
        };
        let dir = self.dir.path().join(model);
        std::fs::create_dir_all(&dir).expect("Failed to create model directory");
        let path = dir.join(frame_file_name(model, color, orientation));
        frame_image(w, h)
            .save(&path)
            .unwrap_or_else(|_| panic!("Failed to save frame at {path:?}"));
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store(&self) -> FrameStore {
        FrameStore::new([self.dir.path()])
    }
}

/// Solid screenshot of the given size.
pub fn screenshot(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, SCREEN)
}

/// PNG bytes of a solid screenshot.
pub fn screenshot_png(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    screenshot(width, height)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("Failed to encode screenshot");
    buf
}

/// Write a solid screenshot PNG into `dir` and return its path.
pub fn write_screenshot(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    screenshot(width, height)
        .save(&path)
        .unwrap_or_else(|_| panic!("Failed to save screenshot at {path:?}"));
    path
}

/// Write a config file into `dir` and return its path.
pub fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write config");
    path
}
