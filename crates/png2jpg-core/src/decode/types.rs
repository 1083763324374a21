//! Core types for image decoding.

use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The supplied text is not valid base64.
    #[error("Invalid base64 image data: {0}")]
    InvalidBase64(String),

    /// An input entry from the host is missing fields or has the wrong shape.
    #[error("Malformed file entry: {0}")]
    MalformedEntry(String),

    /// The bytes are not a decodable PNG image.
    #[error("Invalid or corrupted PNG data: {0}")]
    InvalidPng(String),

    /// The image decoded but has no pixels.
    #[error("Image has zero width or height")]
    EmptyImage,
}

/// A decoded image with RGBA pixel data.
///
/// The origin is always (0, 0); `width` and `height` describe the bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Bytes per pixel (red, green, blue, alpha).
    pub const CHANNELS: usize = 4;

    /// Create a new RasterImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * Self::CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an image where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba.repeat(width as usize * height as usize);
        Self::new(width, height, pixels)
    }

    /// Create a RasterImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Byte offset of the pixel at (x, y).
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * Self::CHANNELS
    }

    /// RGBA value of the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Copy of the pixel data with the alpha channel dropped.
    pub fn to_rgb_pixels(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.pixel_count() * 3);
        for px in self.pixels.chunks_exact(Self::CHANNELS) {
            rgb.extend_from_slice(&px[..3]);
        }
        rgb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_image_creation() {
        let img = RasterImage::new(100, 50, vec![0u8; 100 * 50 * 4]);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.pixel_count(), 5000);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_raster_image_empty() {
        let img = RasterImage::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_filled_and_pixel_access() {
        let img = RasterImage::filled(3, 2, [10, 20, 30, 40]);
        assert_eq!(img.pixels.len(), 3 * 2 * 4);
        assert_eq!(img.pixel(2, 1), [10, 20, 30, 40]);
        assert_eq!(img.offset(1, 1), 16);
    }

    #[test]
    fn test_to_rgb_pixels_drops_alpha() {
        let img = RasterImage::new(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(img.to_rgb_pixels(), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_from_rgba_image() {
        let rgba = image::RgbaImage::from_pixel(4, 3, image::Rgba([1, 2, 3, 4]));
        let img = RasterImage::from_rgba_image(rgba);
        assert_eq!((img.width, img.height), (4, 3));
        assert_eq!(img.pixel(3, 2), [1, 2, 3, 4]);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::InvalidBase64("bad padding".to_string());
        assert_eq!(err.to_string(), "Invalid base64 image data: bad padding");

        let err = DecodeError::EmptyImage;
        assert_eq!(err.to_string(), "Image has zero width or height");
    }
}
