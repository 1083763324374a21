//! Batch conversion: decode, resize, composite, encode, archive.
//!
//! A batch is all-or-nothing. The first image that fails stops the run and
//! no archive is produced.

use log::{debug, info, warn};
use thiserror::Error;

use crate::archive::{build_archive, ArchiveError};
use crate::decode::{decode_png, DecodeError};
use crate::delivery::{ArchiveSink, ARCHIVE_FILE_NAME};
use crate::encode::{check_dimensions, encode_jpeg, EncodeError};
use crate::request::{ArgumentError, ArgumentField, ConversionRequest, ConversionSettings};
use crate::transform::{composite_onto_white, resize_nearest, scaled_dimensions, ResizeError};

/// One converted image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// Source file name without extension.
    pub stem: String,
    /// Encoded JPEG bytes.
    pub jpeg: Vec<u8>,
}

impl ConversionResult {
    /// Name of this result inside the archive.
    pub fn entry_name(&self) -> String {
        format!("{}.jpg", self.stem)
    }
}

/// Anything that can abort a batch.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error("{name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: DecodeError,
    },

    #[error("{name}: {source}")]
    Resize {
        name: String,
        #[source]
        source: ResizeError,
    },

    #[error("{name}: {source}")]
    Encode {
        name: String,
        #[source]
        source: EncodeError,
    },

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// User-facing failure classes, one per stage that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    ResizeAxis,
    TargetSize,
    Quality,
    FileCount,
    /// The image payload could not be read (bad base64 or malformed entry).
    ImageData,
    PngDecode,
    JpegEncode,
    Archive,
}

impl FailureCategory {
    /// Message shown on the page.
    pub fn message(self) -> &'static str {
        match self {
            FailureCategory::ResizeAxis => "指定された縮小方向が不正です",
            FailureCategory::TargetSize => "指定された縮小サイズが不正です",
            FailureCategory::Quality => "指定された画質が不正です",
            FailureCategory::FileCount => "添付されたファイルカウントの取得に失敗しました",
            FailureCategory::ImageData => "添付されたPNGデータの取得に失敗しました",
            FailureCategory::PngDecode => "PNGデータのデコードに失敗しました",
            FailureCategory::JpegEncode => "JPGデータへのエンコードに失敗しました",
            FailureCategory::Archive => "zipファイル作成中にエラーが発生しました",
        }
    }
}

impl From<ArgumentField> for FailureCategory {
    fn from(field: ArgumentField) -> Self {
        match field {
            ArgumentField::ResizeAxis => FailureCategory::ResizeAxis,
            ArgumentField::TargetSize => FailureCategory::TargetSize,
            ArgumentField::Quality => FailureCategory::Quality,
            ArgumentField::FileCount => FailureCategory::FileCount,
        }
    }
}

impl ConvertError {
    pub fn category(&self) -> FailureCategory {
        match self {
            ConvertError::Argument(e) => e.field().into(),
            ConvertError::Decode {
                source: DecodeError::InvalidBase64(_) | DecodeError::MalformedEntry(_),
                ..
            } => FailureCategory::ImageData,
            ConvertError::Decode { .. } => FailureCategory::PngDecode,
            ConvertError::Resize { .. } | ConvertError::Encode { .. } => {
                FailureCategory::JpegEncode
            }
            ConvertError::Archive(_) => FailureCategory::Archive,
        }
    }
}

/// Convert a single image.
///
/// Steps: resolve and decode the PNG, resize if enabled, composite onto
/// white, encode to JPEG. Resize targets whose output would exceed the JPEG
/// size limit fail before any pixels are allocated.
pub fn convert_image(
    settings: &ConversionSettings,
    request: &ConversionRequest,
) -> Result<ConversionResult, ConvertError> {
    let decode_err = |source: DecodeError| ConvertError::Decode {
        name: request.name.clone(),
        source,
    };
    let encode_err = |source: EncodeError| ConvertError::Encode {
        name: request.name.clone(),
        source,
    };

    let bytes = request.source.bytes().map_err(decode_err)?;
    let mut image = decode_png(&bytes).map_err(decode_err)?;
    drop(bytes);
    debug!("decoded {} ({}x{})", request.name, image.width, image.height);

    if settings.resize_enabled() {
        let (width, height) =
            scaled_dimensions(image.width, image.height, settings.axis, settings.target_size);
        check_dimensions(width, height).map_err(encode_err)?;

        image = resize_nearest(&image, settings.axis, settings.target_size).map_err(|source| {
            ConvertError::Resize {
                name: request.name.clone(),
                source,
            }
        })?;
    }

    let opaque = composite_onto_white(&image);
    drop(image);

    let jpeg = encode_jpeg(&opaque, settings.quality).map_err(encode_err)?;

    Ok(ConversionResult {
        stem: request.stem().to_string(),
        jpeg,
    })
}

/// Convert every request in order and pack the results into a ZIP.
///
/// # Errors
///
/// Returns the first error encountered; nothing is archived in that case.
pub fn convert_all(
    settings: &ConversionSettings,
    requests: &[ConversionRequest],
) -> Result<Vec<u8>, ConvertError> {
    info!(
        "converting {} image(s), target {} ({:?}), quality {:?}",
        requests.len(),
        settings.target_size,
        settings.axis,
        settings.quality
    );

    let results = requests
        .iter()
        .map(|request| convert_image(settings, request))
        .collect::<Result<Vec<_>, _>>()?;

    let archive = build_archive(&results)?;
    info!("archive ready ({} bytes)", archive.len());
    Ok(archive)
}

/// Run a batch and hand the outcome to `sink`.
///
/// On success the archive goes to [`ArchiveSink::deliver_archive`]; on
/// failure the category message goes to [`ArchiveSink::report_failure`].
/// Returns whether an archive was delivered.
pub fn run_batch<S: ArchiveSink + ?Sized>(
    settings: &ConversionSettings,
    requests: &[ConversionRequest],
    sink: &S,
) -> bool {
    match convert_all(settings, requests) {
        Ok(archive) => {
            sink.deliver_archive(&archive, ARCHIVE_FILE_NAME);
            true
        }
        Err(err) => {
            report(&err, sink);
            false
        }
    }
}

/// Log an error and forward its category message to `sink`.
pub fn report<S: ArchiveSink + ?Sized>(err: &ConvertError, sink: &S) {
    warn!("conversion failed: {}", err);
    sink.report_failure(err.category().message());
}
