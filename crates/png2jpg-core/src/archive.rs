//! ZIP packaging of converted images.
//!
//! Every entry is Deflate-compressed and stamped with the ZIP epoch
//! (1980-01-01 00:00), so the same input always produces the same archive.
//! The archive is flat: entry names never contain a directory component.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use log::debug;
use thiserror::Error;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::pipeline::ConversionResult;

/// Errors that can occur while building an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Two results map to the same entry name.
    #[error("Duplicate archive entry: {0}")]
    DuplicateEntry(String),

    /// The ZIP writer rejected an entry or could not be finalized.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Writing entry data failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn entry_options() -> FileOptions {
    FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

/// Pack conversion results into one ZIP buffer.
///
/// Entries are named `{stem}.jpg` and written in the order given. The buffer
/// is only returned once the central directory has been written; an empty
/// slice produces a valid empty archive.
///
/// # Errors
///
/// Returns `ArchiveError::DuplicateEntry` if two results share an entry name,
/// or a ZIP/I/O error if writing fails.
pub fn build_archive(results: &[ConversionResult]) -> Result<Vec<u8>, ArchiveError> {
    let mut seen = HashSet::with_capacity(results.len());
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for result in results {
        let name = result.entry_name();
        if !seen.insert(name.clone()) {
            return Err(ArchiveError::DuplicateEntry(name));
        }

        debug!("archive entry {} ({} bytes)", name, result.jpeg.len());
        zip.start_file(name, entry_options())?;
        zip.write_all(&result.jpeg)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Read;
    use zip::ZipArchive;

    proptest! {
        /// Property: extracting the archive returns every input, byte-identical and in order.
        #[test]
        fn prop_archive_round_trip(
            contents in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..512), 0..8),
        ) {
            let results: Vec<ConversionResult> = contents
                .iter()
                .enumerate()
                .map(|(i, bytes)| ConversionResult {
                    stem: format!("image_{i}"),
                    jpeg: bytes.clone(),
                })
                .collect();

            let zip = build_archive(&results).unwrap();
            let mut archive = ZipArchive::new(Cursor::new(zip)).unwrap();
            prop_assert_eq!(archive.len(), results.len());

            for (i, expected) in results.iter().enumerate() {
                let mut file = archive.by_index(i).unwrap();
                prop_assert_eq!(file.name(), expected.entry_name());

                let mut data = Vec::new();
                file.read_to_end(&mut data).unwrap();
                prop_assert_eq!(&data, &expected.jpeg);
            }
        }
    }
}
