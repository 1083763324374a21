//! Conversion entry points called from page script.
//!
//! # Functions
//!
//! - [`convert`] (`Convert` in JS) - Full variant: axis, size, quality
//! - [`convert_legacy`] (`ConvertLegacy` in JS) - Fixed quality, no resize
//! - [`convert_to_zip`] - Returns the archive instead of touching the DOM
//!
//! # Example
//!
//! ```typescript
//! import init, { Convert } from '@png2jpg/wasm';
//!
//! await init();
//!
//! const files = await Promise.all([...input.files].map(async (f) => ({
//!   base64: await toBase64(f),
//!   fileName: f.name,
//! })));
//!
//! // Horizontal axis, 800px wide, quality 85
//! Convert('1', '800', '85', String(files.length), files);
//! ```

use png2jpg_core::{
    convert_all, parse_file_count, parse_integer_argument, report, run_batch, ArgumentField,
    ConversionRequest, ConversionSettings, ConvertError, FileEntry,
};
use wasm_bindgen::prelude::*;

use crate::args::{argument_text, read_requests};
use crate::dom::DomSink;

/// Validate host arguments into settings and requests.
fn prepare(
    resize_axis: &JsValue,
    target_size: &JsValue,
    quality: &JsValue,
    file_count: &JsValue,
    files: &js_sys::Array,
) -> Result<(ConversionSettings, Vec<ConversionRequest>), ConvertError> {
    let settings = ConversionSettings::from_arguments(
        &argument_text(resize_axis),
        &argument_text(target_size),
        &argument_text(quality),
    )?;
    let count = parse_file_count(&argument_text(file_count), files.length() as usize)?;
    let requests = read_requests(files, count)?;
    Ok((settings, requests))
}

/// Category message followed by the technical detail.
fn failure_text(err: &ConvertError) -> String {
    format!("{}: {}", err.category().message(), err)
}

/// Convert PNG files to JPEG and offer them as `archive.zip`.
///
/// # Arguments
///
/// * `resize_axis` - 0 = vertical (target is the height), 1 = horizontal
/// * `target_size` - Target length in pixels; below 50 disables resizing
/// * `quality` - JPEG quality (0-100, clamped)
/// * `file_count` - Number of entries of `files` to convert
/// * `files` - Array of `{ base64, fileName }`
///
/// Numeric arguments may be numbers or numeric strings.
///
/// On success the page's `#output-file` link is pointed at the archive and
/// clicked. On failure nothing is downloaded and a message is written to
/// `#err-msg-spn`.
#[wasm_bindgen(js_name = Convert)]
pub fn convert(
    resize_axis: JsValue,
    target_size: JsValue,
    quality: JsValue,
    file_count: JsValue,
    files: js_sys::Array,
) {
    let sink = DomSink::default();
    match prepare(&resize_axis, &target_size, &quality, &file_count, &files) {
        Ok((settings, requests)) => {
            run_batch(&settings, &requests, &sink);
        }
        Err(err) => report(&err, &sink),
    }
}

/// Convert PNG files to JPEG at the codec's default quality, without resizing.
///
/// `target_size` is validated but otherwise ignored.
#[wasm_bindgen(js_name = ConvertLegacy)]
pub fn convert_legacy(target_size: JsValue, file_count: JsValue, files: js_sys::Array) {
    let sink = DomSink::default();
    let prepared = parse_integer_argument(ArgumentField::TargetSize, &argument_text(&target_size))
        .and_then(|_| parse_file_count(&argument_text(&file_count), files.length() as usize))
        .map_err(ConvertError::from)
        .and_then(|count| read_requests(&files, count));

    match prepared {
        Ok(requests) => {
            run_batch(&ConversionSettings::legacy(), &requests, &sink);
        }
        Err(err) => report(&err, &sink),
    }
}

/// Convert PNG files and return the ZIP bytes.
///
/// # Arguments
///
/// * `settings` - `{ axis: "vertical" | "horizontal", targetSize, quality }`;
///   missing fields take their defaults
/// * `files` - Array of `{ base64, fileName }`
///
/// # Returns
///
/// A `Uint8Array` with the archive, or an error string for the first failure:
/// the same category message `Convert` shows, followed by the details.
#[wasm_bindgen]
pub fn convert_to_zip(settings: JsValue, files: JsValue) -> Result<Vec<u8>, JsValue> {
    let settings: ConversionSettings = serde_wasm_bindgen::from_value(settings)
        .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?;
    let files: Vec<FileEntry> = serde_wasm_bindgen::from_value(files)
        .map_err(|e| JsValue::from_str(&format!("Invalid file list: {}", e)))?;

    let requests: Vec<ConversionRequest> = files.into_iter().map(ConversionRequest::from).collect();
    convert_all(&settings, &requests).map_err(|e| JsValue::from_str(&failure_text(&e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use png2jpg_core::{ArgumentError, FailureCategory};

    #[test]
    fn test_failure_text_leads_with_category_message() {
        let err = ConvertError::from(ArgumentError::UnknownAxis(3));
        let text = failure_text(&err);
        assert!(text.starts_with(FailureCategory::ResizeAxis.message()));
        assert!(text.ends_with("Unknown resize axis: 3 (expected 0 or 1)"));
    }
}
