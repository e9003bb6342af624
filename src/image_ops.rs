//! Image decoding and encoding at the edges of the pipeline.

use std::io::Cursor;
use std::path::Path;

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, RgbaImage};
use tracing::debug;

use crate::error::{MockupError, Result};

const HEIC_BRANDS: &[&[u8; 4]] = &[b"heic", b"heix", b"heim", b"heis", b"hevc", b"hevx", b"mif1", b"msf1"];

/// Returns true if `bytes` look like a HEIF container (ISO-BMFF `ftyp` box
/// with a HEIF brand).
pub fn is_heic(bytes: &[u8]) -> bool {
    if bytes.len() < 12 || &bytes[4..8] != b"ftyp" {
        return false;
    }
    HEIC_BRANDS.iter().any(|brand| &bytes[8..12] == *brand)
}

fn has_heic_extension(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    lower.ends_with(".heic") || lower.ends_with(".heif")
}

fn heic_unsupported() -> MockupError {
    MockupError::DecodeFailure("HEIC/HEIF images are not supported".to_string())
}

/// Decode uploaded bytes into a pixel buffer.
///
/// The format is sniffed from the content. `file_name`, when known, is only
/// used to reject HEIC uploads early with a clear message. An EXIF
/// orientation tag is applied so the pixels come out upright.
pub fn decode_bytes(bytes: &[u8], file_name: Option<&str>) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(MockupError::DecodeFailure("empty upload".to_string()));
    }
    if is_heic(bytes) || file_name.is_some_and(has_heic_extension) {
        return Err(heic_unsupported());
    }

    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| MockupError::DecodeFailure(e.to_string()))?
        .into_decoder()
        .map_err(|e| MockupError::DecodeFailure(e.to_string()))?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut img =
        DynamicImage::from_decoder(decoder).map_err(|e| MockupError::DecodeFailure(e.to_string()))?;
    img.apply_orientation(orientation);
    debug!(
        ?orientation,
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "Decoded image"
    );
    Ok(img)
}

/// Load an image file from disk.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    if !path.is_file() {
        return Err(MockupError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("image not found: {}", path.display()),
        )));
    }

    let bytes = std::fs::read(path)?;
    let name = path.file_name().and_then(|n| n.to_str());
    decode_bytes(&bytes, name)
}

/// Encode an RGBA buffer as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| MockupError::EncodeFailure(e.to_string()))?;
    Ok(buf)
}
