//! Image preprocessing for QR decoding.
//!
//! Uploaded photos are normalized to a canonical decoder input before any
//! symbol detection runs.
//!
//! # Design Decisions
//!
//! - **Fixed canvas**: Every upload is resampled to exactly 800x600. Aspect
//!   ratio is NOT preserved; a distorted-but-canonical input keeps decoder
//!   behavior uniform across arbitrary camera resolutions, and QR symbols
//!   tolerate moderate stretching.
//!
//! - **Grayscale + equalization**: Detection operates on single-channel
//!   intensity. Histogram equalization lifts low-contrast photos (dim
//!   lighting, washed-out prints) into a range the detector handles well.
//!
//! - **Pure transform**: No state, no caching. Preprocessing either yields
//!   an 800x600 grayscale image or rejects the upload as not-an-image.

use image::imageops::FilterType;
use image::GrayImage;
use imageproc::contrast::equalize_histogram;

use crate::error::PreprocessError;

/// Width of the canonical decoder input, in pixels.
pub const CANVAS_WIDTH: u32 = 800;

/// Height of the canonical decoder input, in pixels.
pub const CANVAS_HEIGHT: u32 = 600;

// =============================================================================
// Preprocessing
// =============================================================================

/// Normalize uploaded image bytes into the canonical decoder input.
///
/// The pipeline is: decode (PNG/JPEG), resample to 800x600 with bilinear
/// filtering, convert to 8-bit grayscale, equalize the histogram.
///
/// # Arguments
///
/// * `source` - Raw upload bytes
///
/// # Returns
///
/// An 800x600 grayscale image ready for symbol detection.
///
/// # Errors
///
/// Returns [`PreprocessError::InvalidImage`] if the bytes are not a
/// decodable image. The remaining steps cannot fail on a decoded image.
pub fn preprocess(source: &[u8]) -> Result<GrayImage, PreprocessError> {
    let img = image::load_from_memory(source).map_err(|e| PreprocessError::InvalidImage {
        message: e.to_string(),
    })?;

    if img.width() == 0 || img.height() == 0 {
        return Err(PreprocessError::InvalidImage {
            message: "image has zero width or height".to_string(),
        });
    }

    let resized = img.resize_exact(CANVAS_WIDTH, CANVAS_HEIGHT, FilterType::Triangle);
    let gray = resized.to_luma8();

    Ok(equalize_histogram(&gray))
}

// =============================================================================
// Tests
// =============================================================================
