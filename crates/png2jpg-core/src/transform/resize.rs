//! Nearest-neighbor resizing constrained by one axis.
//!
//! The scale ratio is `target / width` for [`ResizeAxis::Horizontal`] and
//! `target / height` for [`ResizeAxis::Vertical`], applied uniformly to both
//! dimensions. All arithmetic is done on integers so the constrained dimension
//! always comes out exactly equal to the target, and source coordinates never
//! leave the image.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::RasterImage;

/// Which original dimension the target size constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum ResizeAxis {
    /// The target size is the new height.
    #[default]
    Vertical = 0,
    /// The target size is the new width.
    Horizontal = 1,
}

/// Errors that can occur while resizing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResizeError {
    /// The output pixel buffer cannot be allocated.
    #[error("Output of {width}x{height} pixels does not fit in memory")]
    OutputTooLarge { width: u32, height: u32 },
}

impl ResizeAxis {
    /// Length of the constrained dimension of a `width` x `height` image.
    #[inline]
    fn pick(self, width: u32, height: u32) -> u32 {
        match self {
            ResizeAxis::Vertical => height,
            ResizeAxis::Horizontal => width,
        }
    }
}

/// Compute output dimensions for a resize.
///
/// Each dimension is `floor(dim * target / axis_dim)`, raised to 1 if it
/// would otherwise be zero and saturating at `u32::MAX`. A zero-sized source
/// yields `(0, 0)`.
pub fn scaled_dimensions(width: u32, height: u32, axis: ResizeAxis, target: u32) -> (u32, u32) {
    let axis_len = axis.pick(width, height);
    if axis_len == 0 || width == 0 || height == 0 {
        return (0, 0);
    }

    let scale = |dim: u32| -> u32 {
        let scaled = dim as u64 * target as u64 / axis_len as u64;
        scaled.clamp(1, u32::MAX as u64) as u32
    };

    (scale(width), scale(height))
}

/// Map a destination coordinate back to its nearest-neighbor source coordinate.
///
/// `floor(dst / ratio)` where `ratio = target / axis_len`, clamped to the last
/// valid source index.
#[inline]
fn source_coord(dst: u32, axis_len: u32, target: u32, src_len: u32) -> u32 {
    let src = dst as u64 * axis_len as u64 / target as u64;
    src.min(src_len as u64 - 1) as u32
}

/// Resize an image with nearest-neighbor sampling.
///
/// The ratio is derived from the dimension selected by `axis`; the other
/// dimension scales by the same ratio. Upscaling is allowed and produces
/// blocky output.
///
/// # Arguments
///
/// * `image` - The source image (not modified)
/// * `axis` - Which dimension `target` refers to
/// * `target` - Desired length of the constrained dimension
///
/// # Returns
///
/// A new `RasterImage`. If `target` or the source is empty, a clone of the
/// source is returned.
///
/// # Errors
///
/// Returns `ResizeError::OutputTooLarge` if the output buffer size overflows
/// `usize` or cannot be allocated.
pub fn resize_nearest(
    image: &RasterImage,
    axis: ResizeAxis,
    target: u32,
) -> Result<RasterImage, ResizeError> {
    let axis_len = axis.pick(image.width, image.height);
    if target == 0 || image.is_empty() {
        return Ok(image.clone());
    }

    let (dst_w, dst_h) = scaled_dimensions(image.width, image.height, axis, target);

    // Fast path: ratio 1.0 samples every pixel onto itself
    if dst_w == image.width && dst_h == image.height && axis_len == target {
        return Ok(image.clone());
    }

    let too_large = || ResizeError::OutputTooLarge {
        width: dst_w,
        height: dst_h,
    };
    let channels = RasterImage::CHANNELS;
    let len = (dst_w as usize)
        .checked_mul(dst_h as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(too_large)?;
    let mut pixels = Vec::new();
    pixels.try_reserve_exact(len).map_err(|_| too_large())?;

    debug!(
        "resize {}x{} -> {}x{} ({:?}, target {})",
        image.width, image.height, dst_w, dst_h, axis, target
    );

    let src_x: Vec<usize> = (0..dst_w)
        .map(|x| source_coord(x, axis_len, target, image.width) as usize)
        .collect();

    let src_stride = image.width as usize * channels;

    for y in 0..dst_h {
        let sy = source_coord(y, axis_len, target, image.height) as usize;
        let row = &image.pixels[sy * src_stride..(sy + 1) * src_stride];
        for &sx in &src_x {
            pixels.extend_from_slice(&row[sx * channels..(sx + 1) * channels]);
        }
    }

    Ok(RasterImage::new(dst_w, dst_h, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> RasterImage {
        // Each pixel encodes its own coordinates
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x % 256) as u8);
                pixels.push((y % 256) as u8);
                pixels.push(128);
                pixels.push(255);
            }
        }
        RasterImage::new(width, height, pixels)
    }

    #[test]
    fn test_horizontal_downscale() {
        let img = create_test_image(100, 100);
        let out = resize_nearest(&img, ResizeAxis::Horizontal, 50).unwrap();

        assert_eq!((out.width, out.height), (50, 50));
        assert_eq!(out.pixels.len(), 50 * 50 * 4);
        // Destination (x, y) samples source (2x, 2y)
        assert_eq!(out.pixel(10, 20), [20, 40, 128, 255]);
        assert_eq!(out.pixel(49, 49), [98, 98, 128, 255]);
    }

    #[test]
    fn test_vertical_axis_uses_height() {
        let img = create_test_image(200, 100);
        let out = resize_nearest(&img, ResizeAxis::Vertical, 50).unwrap();
        assert_eq!((out.width, out.height), (100, 50));
    }

    #[test]
    fn test_horizontal_axis_uses_width() {
        let img = create_test_image(200, 100);
        let out = resize_nearest(&img, ResizeAxis::Horizontal, 50).unwrap();
        assert_eq!((out.width, out.height), (50, 25));
    }

    #[test]
    fn test_upscale_is_blocky() {
        let img = create_test_image(2, 2);
        let out = resize_nearest(&img, ResizeAxis::Horizontal, 4).unwrap();

        assert_eq!((out.width, out.height), (4, 4));
        assert_eq!(out.pixel(0, 0), out.pixel(1, 1));
        assert_eq!(out.pixel(2, 0), [1, 0, 128, 255]);
        assert_eq!(out.pixel(3, 3), [1, 1, 128, 255]);
    }

    #[test]
    fn test_ratio_one_is_identity() {
        let img = create_test_image(60, 80);
        let out = resize_nearest(&img, ResizeAxis::Vertical, 80).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_zero_target_returns_clone() {
        let img = create_test_image(10, 10);
        assert_eq!(resize_nearest(&img, ResizeAxis::Horizontal, 0).unwrap(), img);
    }

    #[test]
    fn test_thin_dimension_never_zero() {
        let img = create_test_image(1000, 10);
        let out = resize_nearest(&img, ResizeAxis::Horizontal, 50).unwrap();
        // 10 * 50 / 1000 = 0.5 floors to 0, raised to 1
        assert_eq!((out.width, out.height), (50, 1));
    }

    #[test]
    fn test_awkward_ratio_stays_in_bounds() {
        // 3 / 7 style ratios are not representable exactly in floating point
        let img = create_test_image(7, 3);
        let out = resize_nearest(&img, ResizeAxis::Vertical, 51).unwrap();
        assert_eq!((out.width, out.height), (119, 51));
        assert_eq!(out.pixel(118, 50), [6, 2, 128, 255]);
    }

    #[test]
    fn test_scaled_dimensions() {
        assert_eq!(
            scaled_dimensions(6000, 4000, ResizeAxis::Horizontal, 2560),
            (2560, 1706)
        );
        assert_eq!(
            scaled_dimensions(4000, 6000, ResizeAxis::Vertical, 2560),
            (1706, 2560)
        );
        assert_eq!(scaled_dimensions(0, 0, ResizeAxis::Vertical, 256), (0, 0));
    }

    #[test]
    fn test_oversized_output_is_an_error() {
        let img = create_test_image(1, 1);
        let err = resize_nearest(&img, ResizeAxis::Horizontal, u32::MAX).unwrap_err();
        assert_eq!(
            err,
            ResizeError::OutputTooLarge {
                width: u32::MAX,
                height: u32::MAX
            }
        );
    }

    #[test]
    fn test_scaled_dimensions_saturate() {
        assert_eq!(
            scaled_dimensions(2, 1, ResizeAxis::Vertical, u32::MAX),
            (u32::MAX, u32::MAX)
        );
    }

    #[test]
    fn test_resize_axis_default() {
        assert_eq!(ResizeAxis::default(), ResizeAxis::Vertical);
    }
}
