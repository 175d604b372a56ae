//! Image codec adapter: decode uploads, encode masks.
//!
//! The only place the service touches raw image bytes. Decoding accepts any
//! container the `image` crate is built with (PNG/JPEG/BMP/GIF) and
//! normalizes to an 8-bit RGB raster; encoding always produces PNG, the
//! format the frontend overlay expects.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageOutputFormat, RgbImage};

use crate::error::{AnalysisError, Result};

/// Decode uploaded bytes into an RGB raster.
///
/// The raster keeps the pixel dimensions of the input image. Zero-length
/// input and undecodable bytes (truncated file, wrong magic header) are
/// rejected with [`AnalysisError::InvalidImage`].
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage> {
    if bytes.is_empty() {
        return Err(AnalysisError::InvalidImage("empty image payload".to_string()));
    }

    let img = image::load_from_memory(bytes)
        .map_err(|e| AnalysisError::InvalidImage(e.to_string()))?;

    Ok(img.to_rgb8())
}

/// Encode a raster as PNG bytes.
pub fn encode_png(raster: &RgbImage) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    raster.write_to(&mut cursor, ImageOutputFormat::Png)?;
    Ok(cursor.into_inner())
}

/// Base64-encode bytes for JSON transport (standard alphabet, padded).
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
