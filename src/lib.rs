//! # QR Forge
//!
//! An HTTP service for generating and decoding QR codes.
//!
//! This library provides the core functionality for turning URLs, email
//! addresses, and phone numbers into PNG QR code images, for packing
//! batches of those images into zip archives, and for decoding QR symbols
//! out of uploaded photos.
//!
//! ## Features
//!
//! - **Payload validation**: URLs, email addresses, and phone numbers are
//!   checked before any image is generated
//! - **PNG generation**: Error-correction level L symbols with a quiet zone,
//!   rendered at a configurable module size
//! - **Batch archives**: Many payloads in one request, one zip out
//! - **Photo decoding**: Uploaded images are normalized and scanned for a
//!   QR symbol
//! - **Download tokens**: Every generated image can be re-fetched later as
//!   an attachment
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`validate`] - Payload validation for URLs, emails, and phone numbers
//! - [`preprocess`] - Image normalization ahead of decoding
//! - [`qr`] - Encoding, decoding, the download store, and the service facade
//! - [`archive`] - Zip packing for batch responses
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use qr_forge::{create_router, QrService, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = QrService::new();
//!     let router = create_router(service, RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
//!         .await
//!         .unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod archive;
pub mod config;
pub mod error;
pub mod preprocess;
pub mod qr;
pub mod server;
pub mod validate;

// Re-export commonly used types
pub use archive::pack_archive;
pub use config::Config;
pub use error::{ArchiveError, EncodeError, PreprocessError, QrError};
pub use preprocess::{preprocess, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use qr::{
    decode_symbol, DownloadStore, GeneratedQr, QrPngEncoder, QrService, DEFAULT_BATCH_LIMIT,
    DEFAULT_DOWNLOAD_CAPACITY, DEFAULT_MODULE_SIZE, MAX_MODULE_SIZE, MIN_MODULE_SIZE,
};
pub use server::{
    create_router, AppState, DecodedLinkResponse, ErrorResponse, HealthResponse, RouterConfig,
    DEFAULT_MAX_UPLOAD_BYTES, DOWNLOAD_TOKEN_HEADER,
};
pub use validate::{is_valid_email, is_valid_phone, is_valid_url, PayloadKind};
