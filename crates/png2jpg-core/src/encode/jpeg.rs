//! JPEG encoding for converted images.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.
//! The alpha channel is dropped; callers composite transparency first.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::RasterImage;

/// Quality the codec uses when none is requested.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Largest width or height a baseline JPEG frame can describe.
pub const MAX_JPEG_DIMENSION: u32 = u16::MAX as u32;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Width or height exceeds what a JPEG frame header can hold
    #[error(
        "Image too large for JPEG: {width}x{height} (max {max} per side)",
        max = MAX_JPEG_DIMENSION
    )]
    TooLarge { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Reject dimensions a JPEG frame header cannot hold.
pub fn check_dimensions(width: u32, height: u32) -> Result<(), EncodeError> {
    if width > MAX_JPEG_DIMENSION || height > MAX_JPEG_DIMENSION {
        return Err(EncodeError::TooLarge { width, height });
    }
    Ok(())
}

/// Encode an image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - RGBA image; alpha is discarded
/// * `quality` - JPEG quality (1-100), or `None` for the codec default
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, large files
/// * 75: Codec default
/// * Below 60: Low quality, visible artifacts
///
/// Out-of-range values are clamped to 1-100.
pub fn encode_jpeg(image: &RasterImage, quality: Option<u8>) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    check_dimensions(width, height)?;

    let expected_len = image.pixel_count() * RasterImage::CHANNELS;
    if image.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }

    let rgb = image.to_rgb_pixels();
    let mut buffer = Cursor::new(Vec::new());

    let encoder = match quality {
        Some(q) => JpegEncoder::new_with_quality(&mut buffer, q.clamp(1, 100)),
        None => JpegEncoder::new(&mut buffer),
    };

    encoder
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
