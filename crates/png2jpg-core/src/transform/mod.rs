//! Pixel transforms applied between decoding and encoding.
//!
//! # Transform Order
//!
//! For each image in a batch, transforms are applied in this order:
//! 1. Resize (only when the target size is at least [`crate::MIN_RESIZE_TARGET`])
//! 2. Composite onto white
//!
//! Both operations take the source by reference and return a new image.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - Pixels are RGBA, 8 bits per channel, row-major

mod composite;
mod resize;

pub use composite::{composite_onto_white, WHITE};
pub use resize::{resize_nearest, scaled_dimensions, ResizeAxis, ResizeError};
