//! Reading loosely typed host arguments.
//!
//! Page scripts pass numeric settings either as numbers or as the string
//! value of an `<input>`. Both are turned into text here and parsed by
//! `png2jpg_core::request`, so there is a single set of parsing rules.

use png2jpg_core::{ConversionRequest, ConvertError, DecodeError, FileEntry};
use wasm_bindgen::prelude::*;

/// Text form of a host argument.
///
/// Strings pass through, numbers are formatted, anything else becomes an
/// empty string (which then fails integer parsing).
pub(crate) fn argument_text(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        text
    } else if let Some(number) = value.as_f64() {
        number_text(number)
    } else {
        String::new()
    }
}

/// Integral numbers print without a fractional part so they parse as integers.
pub(crate) fn number_text(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

/// Read the first `count` entries of `files` as conversion requests.
pub(crate) fn read_requests(
    files: &js_sys::Array,
    count: usize,
) -> Result<Vec<ConversionRequest>, ConvertError> {
    (0..count)
        .map(|i| {
            serde_wasm_bindgen::from_value::<FileEntry>(files.get(i as u32))
                .map(ConversionRequest::from)
                .map_err(|e| ConvertError::Decode {
                    name: format!("files[{i}]"),
                    source: DecodeError::MalformedEntry(e.to_string()),
                })
        })
        .collect()
}
