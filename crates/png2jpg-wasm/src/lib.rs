//! png2jpg WASM - WebAssembly bindings for the PNG to JPEG converter
//!
//! This crate exposes the png2jpg-core batch pipeline to page script and
//! implements the browser side of delivery: the download link and the error
//! message element.
//!
//! # Module Structure
//!
//! - `convert` - Entry points (`Convert`, `ConvertLegacy`, `convert_to_zip`)
//! - `args` - Turning loosely typed JS arguments into typed requests
//! - `dom` - `ArchiveSink` implementation backed by the document
//! - `logger` - Routes `log` records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { Convert } from '@png2jpg/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! Convert(axis, size, quality, files.length, files);
//! ```

use log::LevelFilter;
use wasm_bindgen::prelude::*;

mod args;
mod convert;
mod dom;
mod logger;

// Re-export public types
pub use convert::{convert, convert_legacy, convert_to_zip};
pub use dom::{DomSink, ERROR_MESSAGE_ID, OUTPUT_LINK_ID};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init(LevelFilter::Info);
}

/// Change the console log level ("off", "error", "warn", "info", "debug", "trace").
///
/// Returns false if the level name is not recognized.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match level.parse::<LevelFilter>() {
        Ok(filter) => {
            logger::init(filter);
            true
        }
        Err(_) => false,
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}


/// Installs the console logger, so it only runs where the console exists.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_set_log_level() {
        assert!(set_log_level("debug"));
        assert_eq!(log::max_level(), LevelFilter::Debug);
        assert!(!set_log_level("loud"));
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }
}
