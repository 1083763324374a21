//! Image encoding for the conversion pipeline.
//!
//! This module provides functionality for:
//! - Encoding composited images to JPEG format with configurable quality
//!
//! # Examples
//!
//! ```ignore
//! use png2jpg_core::decode::RasterImage;
//! use png2jpg_core::encode::encode_jpeg;
//!
//! let image = RasterImage::filled(100, 100, [128, 128, 128, 255]);
//! let jpeg_bytes = encode_jpeg(&image, Some(90)).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{
    check_dimensions, encode_jpeg, EncodeError, DEFAULT_JPEG_QUALITY, MAX_JPEG_DIMENSION,
};
