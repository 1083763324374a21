//! png2jpg Core - PNG to JPEG batch conversion
//!
//! This crate converts a batch of PNG images into JPEGs and packs them into a
//! single ZIP archive. Per image:
//!
//! 1. Decode the PNG (optionally from base64)
//! 2. Resize with nearest-neighbor sampling, if the target size is at least
//!    [`MIN_RESIZE_TARGET`]
//! 3. Paint fully transparent pixels white
//! 4. Encode to JPEG at the requested quality
//!
//! The results are archived as `{stem}.jpg` entries. A batch either fully
//! succeeds or produces nothing.

pub mod archive;
pub mod decode;
pub mod delivery;
pub mod encode;
pub mod pipeline;
pub mod request;
pub mod transform;

pub use archive::{build_archive, ArchiveError};
pub use decode::{DecodeError, RasterImage};
pub use delivery::{data_uri, ArchiveSink, ARCHIVE_FILE_NAME, ARCHIVE_MIME_TYPE};
pub use encode::{
    check_dimensions, encode_jpeg, EncodeError, DEFAULT_JPEG_QUALITY, MAX_JPEG_DIMENSION,
};
pub use pipeline::{
    convert_all, convert_image, report, run_batch, ConversionResult, ConvertError,
    FailureCategory,
};
pub use request::{
    parse_file_count, parse_integer_argument, strip_extension, ArgumentError, ArgumentField,
    ConversionRequest, ConversionSettings, FileEntry, ImageSource, MIN_RESIZE_TARGET,
};
pub use transform::{
    composite_onto_white, resize_nearest, scaled_dimensions, ResizeAxis, ResizeError,
};
