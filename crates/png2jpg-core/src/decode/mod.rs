//! Image decoding for the conversion pipeline.
//!
//! This module provides functionality for:
//! - Decoding base64 text supplied by the host page
//! - Decoding PNG images into RGBA pixel buffers
//!
//! # Architecture
//!
//! Decoding is called from the WASM bindings on the main thread.
//! All operations are synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use png2jpg_core::decode::{decode_base64, decode_png};
//!
//! let bytes = decode_base64(&base64_text).unwrap();
//! let image = decode_png(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod png;
mod types;

pub use png::{decode_base64, decode_png};
pub use types::{DecodeError, RasterImage};
