//! QR symbol encoder.
//!
//! This module renders text payloads into PNG images of QR symbols. The
//! symbol construction itself (codeword packing, masking, error correction)
//! is delegated to the `qrcode` crate.
//!
//! # Design Decisions
//!
//! - **Fixed error correction**: Level L (~7% recovery). Generated symbols
//!   are expected to be scanned from screens or clean prints, so capacity
//!   wins over robustness.
//!
//! - **Auto version**: The smallest QR version that fits the payload is
//!   selected by the encoder. Payloads beyond version 40 capacity are
//!   rejected, never truncated.
//!
//! - **Server-fixed geometry**: Module size is set at startup, not per
//!   request. The quiet zone is the standard four modules on every side.
//!   Dark modules are black on a white background.

use bytes::Bytes;
use image::codecs::png::PngEncoder;
use image::Luma;
use qrcode::{EcLevel, QrCode};

use crate::error::EncodeError;

/// Default module (QR "pixel") edge length, in image pixels.
pub const DEFAULT_MODULE_SIZE: u32 = 10;

/// Minimum allowed module size.
pub const MIN_MODULE_SIZE: u32 = 1;

/// Maximum allowed module size.
pub const MAX_MODULE_SIZE: u32 = 50;

// =============================================================================
// PNG Encoder
// =============================================================================

/// QR-to-PNG encoder.
///
/// Holds the render geometry and turns validated payloads into PNG bytes.
///
/// # Example
///
/// ```ignore
/// use qr_forge::qr::QrPngEncoder;
///
/// let encoder = QrPngEncoder::new();
/// let png = encoder.encode("https://example.com")?;
/// ```
#[derive(Debug, Clone)]
pub struct QrPngEncoder {
    /// Edge length of one module in output pixels.
    module_size: u32,
}

impl QrPngEncoder {
    /// Create an encoder with the default module size.
    pub fn new() -> Self {
        Self {
            module_size: DEFAULT_MODULE_SIZE,
        }
    }

    /// Create an encoder with a specific module size.
    ///
    /// Out-of-range sizes are clamped to `MIN_MODULE_SIZE..=MAX_MODULE_SIZE`.
    pub fn with_module_size(module_size: u32) -> Self {
        Self {
            module_size: module_size.clamp(MIN_MODULE_SIZE, MAX_MODULE_SIZE),
        }
    }

    /// Get the configured module size.
    pub fn module_size(&self) -> u32 {
        self.module_size
    }

    /// Render a payload into a PNG image of a QR symbol.
    ///
    /// # Arguments
    ///
    /// * `payload` - The exact text to embed (already validated by the caller)
    ///
    /// # Returns
    ///
    /// PNG bytes of a black-on-white symbol with a four-module quiet zone.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The payload exceeds version 40 capacity at level L
    /// - PNG serialization fails
    pub fn encode(&self, payload: &str) -> Result<Bytes, EncodeError> {
        let code = QrCode::with_error_correction_level(payload, EcLevel::L).map_err(|e| {
            EncodeError::Symbol {
                message: e.to_string(),
            }
        })?;

        let img = code
            .render::<Luma<u8>>()
            .module_dimensions(self.module_size, self.module_size)
            .quiet_zone(true)
            .build();

        let mut output = Vec::new();
        img.write_with_encoder(PngEncoder::new(&mut output))
            .map_err(|e| EncodeError::Png {
                message: e.to_string(),
            })?;

        Ok(Bytes::from(output))
    }
}

impl Default for QrPngEncoder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
