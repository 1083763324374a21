//! Handing finished archives (or failures) to the host.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// File name offered for the downloaded archive.
pub const ARCHIVE_FILE_NAME: &str = "archive.zip";

/// MIME type of the downloaded archive.
pub const ARCHIVE_MIME_TYPE: &str = "application/zip";

/// Receiver for the outcome of a batch.
///
/// In the browser this triggers a download or writes an error message into
/// the page; tests record the calls.
pub trait ArchiveSink {
    /// Offer a finished archive to the user.
    fn deliver_archive(&self, bytes: &[u8], suggested_name: &str);

    /// Show a failure message to the user.
    fn report_failure(&self, message: &str);
}

/// Build a `data:` URI carrying `bytes` as base64.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}
