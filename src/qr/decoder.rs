//! QR symbol detection and decoding.
//!
//! Thin wrapper around the `rqrr` detector. Finder-pattern search,
//! perspective correction, and Reed-Solomon decoding all live in the
//! library; this module only maps its outcomes onto the service error
//! taxonomy.

use image::GrayImage;
use tracing::{debug, info};

use crate::error::QrError;

/// Detect and decode a QR symbol in a preprocessed image.
///
/// Runs a single detection pass. If several symbols are present, the first
/// detected grid wins. There are no retries with alternative preprocessing.
///
/// # Arguments
///
/// * `image` - Grayscale image, normally the output of
///   [`crate::preprocess::preprocess`]
///
/// # Returns
///
/// The decoded text payload, verbatim.
///
/// # Errors
///
/// * [`QrError::SymbolNotFound`] - no QR symbol detected in the image
/// * [`QrError::SymbolUnreadable`] - a symbol was detected but its content
///   could not be extracted (damaged or over-distorted)
pub fn decode_symbol(image: GrayImage) -> Result<String, QrError> {
    let mut prepared = rqrr::PreparedImage::prepare(image);
    let grids = prepared.detect_grids();

    let grid = grids.first().ok_or(QrError::SymbolNotFound)?;
    if grids.len() > 1 {
        debug!(grids = grids.len(), "multiple QR symbols detected, decoding the first");
    }

    let (_, content) = grid.decode().map_err(|e| QrError::SymbolUnreadable {
        message: e.to_string(),
    })?;

    info!(payload_len = content.len(), "decoded QR symbol");
    Ok(content)
}

// =============================================================================
// Tests
// =============================================================================
