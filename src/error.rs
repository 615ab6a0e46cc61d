use thiserror::Error;

use crate::validate::PayloadKind;

/// Errors that can occur while preparing an uploaded image for decoding
#[derive(Debug, Clone, Error)]
pub enum PreprocessError {
    /// Upload bytes could not be decoded as a supported image (should map to HTTP 400)
    #[error("Invalid image: {message}")]
    InvalidImage { message: String },
}

/// Errors that can occur while rendering a QR symbol to PNG
#[derive(Debug, Clone, Error)]
pub enum EncodeError {
    /// Payload rejected by the symbol encoder (too long for version 40)
    #[error("QR encoding failed: {message}")]
    Symbol { message: String },

    /// PNG serialization of the rendered symbol failed
    #[error("PNG encoding failed: {message}")]
    Png { message: String },
}

/// Errors that can occur while packing generated symbols into a zip archive
#[derive(Debug, Clone, Error)]
pub enum ArchiveError {
    /// Zip writer rejected an entry or failed to finalize the archive
    #[error("Archive error: {message}")]
    Zip { message: String },
}

/// Service-level errors returned by the HTTP handlers
#[derive(Debug, Clone, Error)]
pub enum QrError {
    /// Uploaded image could not be preprocessed
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),

    /// Symbol rendering failed (should map to HTTP 500)
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Archive packing failed (should map to HTTP 500)
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Payload failed validation for its kind (should map to HTTP 400)
    #[error("invalid {kind}: {value:?}")]
    InvalidPayload { kind: PayloadKind, value: String },

    /// No QR symbol detected in the image (should map to HTTP 404)
    #[error("no QR code found in the image")]
    SymbolNotFound,

    /// A symbol was detected but its content could not be extracted (should map to HTTP 404)
    #[error("QR code detected but could not be decoded: {message}")]
    SymbolUnreadable { message: String },

    /// Multipart request carried no `file` field (should map to HTTP 400)
    #[error("multipart upload is missing the 'file' field")]
    MissingFile,

    /// Multipart request could not be parsed (should map to HTTP 400)
    #[error("malformed multipart upload: {message}")]
    BadUpload { message: String },

    /// Uploaded body exceeds the configured size limit (should map to HTTP 413)
    #[error("uploaded file exceeds the size limit")]
    UploadTooLarge,

    /// Batch request carried no payloads (should map to HTTP 400)
    #[error("batch contains no payloads")]
    EmptyBatch,

    /// Batch request exceeds the configured payload limit (should map to HTTP 400)
    #[error("batch of {count} payloads exceeds the limit of {limit}")]
    BatchTooLarge { count: usize, limit: usize },

    /// Download request carried no token (should map to HTTP 400)
    #[error("missing download token")]
    MissingToken,

    /// Download token is unknown or its entry has been evicted (should map to HTTP 404)
    #[error("no generated QR code for this download token")]
    UnknownToken,
}
