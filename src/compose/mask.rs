//! Rounded-rectangle masks and masked pasting.

use image::{GrayImage, Luma, RgbaImage};

/// Build a `width` x `height` alpha mask holding a rounded rectangle.
///
/// Pixels are sampled at their centers: a pixel is opaque (255) when its
/// center lies inside the rounded rectangle spanning the whole mask, and
/// transparent (0) otherwise. `radius` must not exceed half the shorter side.
pub fn rounded_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    if radius == 0 {
        return GrayImage::from_pixel(width, height, Luma([255]));
    }

    let r = f64::from(radius);
    let r_sq = r * r;
    let right_center = f64::from(width) - r;
    let bottom_center = f64::from(height) - r;

    GrayImage::from_fn(width, height, |x, y| {
        let px = f64::from(x) + 0.5;
        let py = f64::from(y) + 0.5;

        let dx = if px < r {
            r - px
        } else if px > right_center {
            px - right_center
        } else {
            0.0
        };
        let dy = if py < r {
            r - py
        } else if py > bottom_center {
            py - bottom_center
        } else {
            0.0
        };

        if dx * dx + dy * dy <= r_sq {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Paste `src` into `dst` with its top-left corner at (`x`, `y`), weighting
/// every channel by the matching `mask` value.
///
/// `mask` must have the same dimensions as `src`. Parts of `src` that fall
/// outside `dst` are ignored.
pub fn paste_masked(dst: &mut RgbaImage, src: &RgbaImage, mask: &GrayImage, x: u32, y: u32) {
    debug_assert_eq!(src.dimensions(), mask.dimensions());

    let cols = src.width().min(dst.width().saturating_sub(x));
    let rows = src.height().min(dst.height().saturating_sub(y));

    for sy in 0..rows {
        for sx in 0..cols {
            let weight = u32::from(mask.get_pixel(sx, sy)[0]);
            if weight == 0 {
                continue;
            }

            let s = src.get_pixel(sx, sy);
            let d = dst.get_pixel_mut(x + sx, y + sy);
            if weight == 255 {
                *d = *s;
                continue;
            }

            for c in 0..4 {
                let blended =
                    (u32::from(s[c]) * weight + u32::from(d[c]) * (255 - weight) + 127) / 255;
                d[c] = blended as u8;
            }
        }
    }
}
