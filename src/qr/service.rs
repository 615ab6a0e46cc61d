//! QR service for orchestrating generation and decoding.
//!
//! The QrService is the main entry point for the HTTP handlers. It
//! orchestrates:
//! - Payload validation
//! - Symbol rendering to PNG
//! - Download token bookkeeping
//! - Batch packing into zip archives
//! - The upload decode pipeline
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                           QrService                              │
//! │  ┌────────────────────────────┐  ┌────────────────────────────┐  │
//! │  │  generate() / batch()      │  │  decode()                  │  │
//! │  │  1. Validate payload(s)    │  │  1. Preprocess upload      │  │
//! │  │  2. Render PNG symbol(s)   │  │  2. Detect + decode symbol │  │
//! │  │  3. Store / pack result    │  │                            │  │
//! │  └────────────────────────────┘  └────────────────────────────┘  │
//! │        │               │                      │                  │
//! │        ▼               ▼                      ▼                  │
//! │  ┌──────────────┐ ┌───────────────┐  ┌─────────────────────┐     │
//! │  │ QrPngEncoder │ │ DownloadStore │  │ preprocess + rqrr   │     │
//! │  └──────────────┘ └───────────────┘  └─────────────────────┘     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use bytes::Bytes;

use crate::archive::pack_archive;
use crate::error::QrError;
use crate::preprocess::preprocess;
use crate::validate::PayloadKind;

use super::decoder::decode_symbol;
use super::encoder::QrPngEncoder;
use super::store::DownloadStore;

/// Default maximum number of payloads accepted in one batch request.
pub const DEFAULT_BATCH_LIMIT: usize = 100;

// =============================================================================
// Generated QR
// =============================================================================

/// Result of a single-symbol generation.
#[derive(Debug, Clone)]
pub struct GeneratedQr {
    /// The PNG-encoded symbol
    pub data: Bytes,

    /// Download token under which the PNG was stored
    pub token: String,
}

// =============================================================================
// QR Service
// =============================================================================

/// Service for generating, packing, and decoding QR symbols.
///
/// Generation validates the payload for its kind, renders the symbol, and
/// deposits a copy in the download store. Batches are all-or-nothing: every
/// payload is validated before any symbol is rendered, and batch archives
/// are returned inline without touching the download store.
///
/// # Example
///
/// ```ignore
/// use qr_forge::qr::QrService;
/// use qr_forge::validate::PayloadKind;
///
/// let service = QrService::new();
/// let generated = service.generate(PayloadKind::Url, "https://example.com").await?;
///
/// println!("PNG: {} bytes, token: {}", generated.data.len(), generated.token);
/// ```
pub struct QrService {
    /// Renders payloads into PNG symbols
    encoder: QrPngEncoder,

    /// Token store backing `GET /download_qr`
    store: DownloadStore,

    /// Maximum payloads per batch request
    batch_limit: usize,
}

impl QrService {
    /// Create a service with default encoder geometry, store capacity, and
    /// batch limit.
    pub fn new() -> Self {
        Self {
            encoder: QrPngEncoder::new(),
            store: DownloadStore::new(),
            batch_limit: DEFAULT_BATCH_LIMIT,
        }
    }

    /// Create a service from explicit parts.
    ///
    /// # Arguments
    ///
    /// * `encoder` - Symbol renderer (carries the module size)
    /// * `store` - Download store (carries its capacity)
    /// * `batch_limit` - Maximum payloads per batch request (zero is treated
    ///   as one)
    pub fn with_parts(encoder: QrPngEncoder, store: DownloadStore, batch_limit: usize) -> Self {
        Self {
            encoder,
            store,
            batch_limit: batch_limit.max(1),
        }
    }

    /// Get the configured batch limit.
    pub fn batch_limit(&self) -> usize {
        self.batch_limit
    }

    /// Get the number of downloads currently stored.
    pub async fn download_count(&self) -> usize {
        self.store.len().await
    }

    /// Generate a single QR symbol.
    ///
    /// The payload is validated for `kind`, rendered to PNG, and stored
    /// under a fresh download token.
    ///
    /// # Errors
    ///
    /// * [`QrError::InvalidPayload`] - payload failed validation; nothing is
    ///   rendered or stored
    /// * [`QrError::Encode`] - payload validated but could not be rendered
    pub async fn generate(&self, kind: PayloadKind, payload: &str) -> Result<GeneratedQr, QrError> {
        if !kind.validate(payload) {
            return Err(QrError::InvalidPayload {
                kind,
                value: payload.to_string(),
            });
        }

        let data = self.encoder.encode(payload)?;
        let token = self.store.put(data.clone()).await;

        Ok(GeneratedQr { data, token })
    }

    /// Generate a batch of QR symbols packed into one zip archive.
    ///
    /// Validation runs over the whole batch before any symbol is rendered,
    /// so a single invalid payload fails the request without side effects.
    /// Entries are named `qr_code_<kind>_<N>.png`, 1-indexed in input order.
    ///
    /// # Errors
    ///
    /// * [`QrError::EmptyBatch`] - no payloads supplied
    /// * [`QrError::BatchTooLarge`] - more payloads than the batch limit
    /// * [`QrError::InvalidPayload`] - first payload to fail validation, by
    ///   input order
    /// * [`QrError::Encode`] / [`QrError::Archive`] - rendering or packing
    ///   failed
    pub fn generate_batch(&self, kind: PayloadKind, payloads: &[String]) -> Result<Bytes, QrError> {
        if payloads.is_empty() {
            return Err(QrError::EmptyBatch);
        }
        if payloads.len() > self.batch_limit {
            return Err(QrError::BatchTooLarge {
                count: payloads.len(),
                limit: self.batch_limit,
            });
        }

        // First pass: validate everything before rendering anything
        for payload in payloads {
            if !kind.validate(payload) {
                return Err(QrError::InvalidPayload {
                    kind,
                    value: payload.clone(),
                });
            }
        }

        // Second pass: render and pack
        let mut entries = Vec::with_capacity(payloads.len());
        for (position, payload) in payloads.iter().enumerate() {
            let data = self.encoder.encode(payload)?;
            entries.push((entry_name(kind, position + 1), data));
        }

        Ok(pack_archive(entries)?)
    }

    /// Decode the QR symbol in an uploaded image.
    ///
    /// Runs the full pipeline: preprocess to the canonical 800x600
    /// grayscale canvas, then a single detection pass.
    ///
    /// # Errors
    ///
    /// * [`QrError::Preprocess`] - upload is not a decodable image
    /// * [`QrError::SymbolNotFound`] / [`QrError::SymbolUnreadable`] - no
    ///   usable symbol in the image
    pub fn decode(&self, upload: &[u8]) -> Result<String, QrError> {
        let canonical = preprocess(upload)?;
        decode_symbol(canonical)
    }

    /// Redeem a download token.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::UnknownToken`] if the token never existed or its
    /// entry was evicted.
    pub async fn download(&self, token: &str) -> Result<Bytes, QrError> {
        self.store.get(token).await.ok_or(QrError::UnknownToken)
    }
}

impl Default for QrService {
    fn default() -> Self {
        Self::new()
    }
}

/// Archive entry name for the `position`-th payload of a batch (1-indexed).
fn entry_name(kind: PayloadKind, position: usize) -> String {
    format!("qr_code_{}_{}.png", kind.label(), position)
}

// =============================================================================
// Tests
// =============================================================================
