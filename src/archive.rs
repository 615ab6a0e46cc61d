//! Zip packing for batch generation.
//!
//! Batch endpoints return one archive containing every generated symbol.
//! This module owns only the packing mechanics; entry naming is decided by
//! the service layer.

use std::io::{Cursor, Write};

use bytes::Bytes;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ArchiveError;

/// Pack named byte buffers into a single zip archive.
///
/// Entries are written in iteration order with Deflate compression. An empty
/// input yields a valid empty archive; callers decide whether that is
/// acceptable.
///
/// # Arguments
///
/// * `entries` - `(entry name, file bytes)` pairs
///
/// # Returns
///
/// The complete archive as an in-memory buffer.
///
/// # Errors
///
/// Returns [`ArchiveError::Zip`] if the writer rejects an entry name or
/// fails to finalize the central directory.
pub fn pack_archive<I>(entries: I) -> Result<Bytes, ArchiveError>
where
    I: IntoIterator<Item = (String, Bytes)>,
{
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, data) in entries {
        writer
            .start_file(name, options)
            .map_err(|e| ArchiveError::Zip {
                message: e.to_string(),
            })?;
        writer.write_all(&data).map_err(|e| ArchiveError::Zip {
            message: e.to_string(),
        })?;
    }

    let cursor = writer.finish().map_err(|e| ArchiveError::Zip {
        message: e.to_string(),
    })?;

    Ok(Bytes::from(cursor.into_inner()))
}

// =============================================================================
// Tests
// =============================================================================
