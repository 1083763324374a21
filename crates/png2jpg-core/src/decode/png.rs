//! PNG and base64 decoding.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{DynamicImage, ImageBuffer, ImageFormat, ImageReader, Rgba, RgbaImage};

use super::{DecodeError, RasterImage};

/// Decode a PNG image from bytes into RGBA pixels.
///
/// Grayscale, RGB, palette and 16-bit PNGs are all converted to 8-bit RGBA.
/// A 16-bit alpha that is non-zero never rounds down to 0, so only pixels that
/// are fully transparent in the file read as transparent.
///
/// # Errors
///
/// Returns `DecodeError::InvalidPng` if the bytes are not a valid PNG.
/// Returns `DecodeError::EmptyImage` if the decoded image has no pixels.
pub fn decode_png(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let reader = ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png);

    let img = reader
        .decode()
        .map_err(|e| DecodeError::InvalidPng(e.to_string()))?;

    let wide_alpha = match &img {
        DynamicImage::ImageLumaA16(_) | DynamicImage::ImageRgba16(_) => Some(img.to_rgba16()),
        _ => None,
    };
    let mut rgba = img.into_rgba8();
    if let Some(wide) = wide_alpha {
        keep_faint_alpha(&mut rgba, &wide);
    }

    let image = RasterImage::from_rgba_image(rgba);
    if image.is_empty() {
        return Err(DecodeError::EmptyImage);
    }
    Ok(image)
}

/// Raise alpha to 1 where 16-bit alpha was non-zero but rounded to 0.
fn keep_faint_alpha(narrow: &mut RgbaImage, wide: &ImageBuffer<Rgba<u16>, Vec<u16>>) {
    for (px, wide_px) in narrow.pixels_mut().zip(wide.pixels()) {
        if px.0[3] == 0 && wide_px.0[3] != 0 {
            px.0[3] = 1;
        }
    }
}

/// Decode standard (padded) base64 text into bytes.
///
/// # Errors
///
/// Returns `DecodeError::InvalidBase64` if the text is not valid base64.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, DecodeError> {
    BASE64
        .decode(text.trim())
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))
}
