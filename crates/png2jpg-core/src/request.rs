//! Typed conversion requests and validation of host-supplied arguments.
//!
//! The page passes numeric settings as loosely typed values (numbers or
//! strings). They are parsed here, once, into [`ConversionSettings`]; each
//! argument that fails to parse yields its own [`ArgumentError`].

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{decode_base64, DecodeError};
use crate::transform::ResizeAxis;

/// Smallest target size that enables resizing. Anything below passes images
/// through at their original size.
pub const MIN_RESIZE_TARGET: u32 = 50;

/// Positional argument names, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentField {
    ResizeAxis,
    TargetSize,
    Quality,
    FileCount,
}

impl fmt::Display for ArgumentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgumentField::ResizeAxis => "resize axis",
            ArgumentField::TargetSize => "target size",
            ArgumentField::Quality => "quality",
            ArgumentField::FileCount => "file count",
        };
        f.write_str(name)
    }
}

/// Errors raised while validating host arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    /// The value is not a decimal integer.
    #[error("Invalid {field} argument: {value:?} is not an integer")]
    NotAnInteger { field: ArgumentField, value: String },

    /// The axis is an integer other than 0 (vertical) or 1 (horizontal).
    #[error("Unknown resize axis: {0} (expected 0 or 1)")]
    UnknownAxis(i64),

    /// The target size does not fit in a pixel dimension.
    #[error("Target size {0} is out of range")]
    TargetSizeTooLarge(i64),

    /// The file count is negative.
    #[error("File count must not be negative: {0}")]
    NegativeFileCount(i64),

    /// The file count exceeds the number of entries supplied.
    #[error("File count {declared} exceeds the {provided} entries provided")]
    FileCountMismatch { declared: usize, provided: usize },
}

impl ArgumentError {
    /// Which argument the error refers to.
    pub fn field(&self) -> ArgumentField {
        match self {
            ArgumentError::NotAnInteger { field, .. } => *field,
            ArgumentError::UnknownAxis(_) => ArgumentField::ResizeAxis,
            ArgumentError::TargetSizeTooLarge(_) => ArgumentField::TargetSize,
            ArgumentError::NegativeFileCount(_) | ArgumentError::FileCountMismatch { .. } => {
                ArgumentField::FileCount
            }
        }
    }
}

/// Parse one integer argument, ignoring surrounding whitespace.
pub fn parse_integer_argument(field: ArgumentField, text: &str) -> Result<i64, ArgumentError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| ArgumentError::NotAnInteger {
            field,
            value: text.to_string(),
        })
}

impl TryFrom<i64> for ResizeAxis {
    type Error = ArgumentError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ResizeAxis::Vertical),
            1 => Ok(ResizeAxis::Horizontal),
            other => Err(ArgumentError::UnknownAxis(other)),
        }
    }
}

/// Settings shared by every image in one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionSettings {
    /// Which dimension `target_size` constrains.
    pub axis: ResizeAxis,
    /// Target length in pixels; below [`MIN_RESIZE_TARGET`] disables resizing.
    pub target_size: u32,
    /// JPEG quality, `None` for the codec default.
    pub quality: Option<u8>,
}

impl ConversionSettings {
    /// Settings of the original simple converter: no resize, default quality.
    pub fn legacy() -> Self {
        Self::default()
    }

    /// Parse the textual axis, target size and quality arguments.
    ///
    /// Quality is clamped into 0-100 and a negative target size is treated as
    /// "no resize". Non-integers, unknown axes and target sizes beyond
    /// `u32::MAX` are errors.
    pub fn from_arguments(
        axis: &str,
        target_size: &str,
        quality: &str,
    ) -> Result<Self, ArgumentError> {
        let axis = ResizeAxis::try_from(parse_integer_argument(ArgumentField::ResizeAxis, axis)?)?;
        let target_size = parse_integer_argument(ArgumentField::TargetSize, target_size)?;
        let quality = parse_integer_argument(ArgumentField::Quality, quality)?;
        let target_size = u32::try_from(target_size.max(0))
            .map_err(|_| ArgumentError::TargetSizeTooLarge(target_size))?;

        Ok(Self {
            axis,
            target_size,
            quality: Some(quality.clamp(0, 100) as u8),
        })
    }

    /// Whether images in this batch get resized.
    pub fn resize_enabled(&self) -> bool {
        self.target_size >= MIN_RESIZE_TARGET
    }
}

/// Parse the declared file count and check it against the entries supplied.
pub fn parse_file_count(text: &str, provided: usize) -> Result<usize, ArgumentError> {
    let declared = parse_integer_argument(ArgumentField::FileCount, text)?;
    if declared < 0 {
        return Err(ArgumentError::NegativeFileCount(declared));
    }

    let declared = declared as usize;
    if declared > provided {
        return Err(ArgumentError::FileCountMismatch { declared, provided });
    }
    Ok(declared)
}

/// Where the PNG bytes of a request come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Bytes(Vec<u8>),
    /// Decoded only when the pipeline reaches this request.
    Base64(String),
}

impl ImageSource {
    /// Resolve to raw PNG bytes.
    pub fn bytes(&self) -> Result<Cow<'_, [u8]>, DecodeError> {
        match self {
            ImageSource::Bytes(bytes) => Ok(Cow::Borrowed(bytes.as_slice())),
            ImageSource::Base64(text) => decode_base64(text).map(Cow::Owned),
        }
    }
}

/// One input as the host page describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub base64: String,
    pub file_name: String,
}

/// One image to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Declared file name, extension included.
    pub name: String,
    pub source: ImageSource,
}

impl ConversionRequest {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: ImageSource::Bytes(bytes),
        }
    }

    pub fn from_base64(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ImageSource::Base64(text.into()),
        }
    }

    /// File name without directories or extension.
    pub fn stem(&self) -> &str {
        strip_extension(&self.name)
    }
}

impl From<FileEntry> for ConversionRequest {
    fn from(entry: FileEntry) -> Self {
        Self::from_base64(entry.file_name, entry.base64)
    }
}

/// Strip directories and the extension from a file name.
///
/// Only the last path segment is kept (both `/` and `\` separate segments),
/// and everything from its last `.` on is removed.
///
/// ```ignore
/// assert_eq!(strip_extension("photo.png"), "photo");
/// assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
/// ```
pub fn strip_extension(name: &str) -> &str {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base.rfind('.') {
        Some(dot) => &base[..dot],
        None => base,
    }
}
