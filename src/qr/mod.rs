//! QR service layer.
//!
//! This module provides QR symbol generation, decoding, and download
//! bookkeeping behind the HTTP surface.
//!
//! # Architecture
//!
//! The service sits between the HTTP layer and the symbol libraries:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │               QrService                 │
//! │  ┌──────────────┐  ┌─────────────────┐  │
//! │  │ QrPngEncoder │  │  DownloadStore  │  │
//! │  │ (payload →   │  │  (token →       │  │
//! │  │  PNG symbol) │  │   stored PNG)   │  │
//! │  └──────────────┘  └─────────────────┘  │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │     preprocess + rqrr decode pass       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`QrService`]: Main entry point, orchestrates validation, rendering, packing, decoding
//! - [`QrPngEncoder`]: Renders a validated payload into a PNG symbol
//! - [`decode_symbol`]: Single detection pass over a preprocessed image
//! - [`DownloadStore`]: Bounded LRU mapping download tokens to stored PNGs
//! - [`GeneratedQr`]: PNG bytes plus the download token they were stored under
//!
//! # Example
//!
//! ```
//! use qr_forge::qr::QrService;
//! use qr_forge::validate::PayloadKind;
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = QrService::new();
//!
//!     let generated = service
//!         .generate(PayloadKind::Url, "https://example.com")
//!         .await
//!         .unwrap();
//!
//!     // The stored copy stays retrievable under its token
//!     let stored = service.download(&generated.token).await.unwrap();
//!     assert_eq!(stored, generated.data);
//! }
//! ```

mod decoder;
mod encoder;
mod service;
mod store;

pub use decoder::decode_symbol;
pub use encoder::{QrPngEncoder, DEFAULT_MODULE_SIZE, MAX_MODULE_SIZE, MIN_MODULE_SIZE};
pub use service::{GeneratedQr, QrService, DEFAULT_BATCH_LIMIT};
pub use store::{DownloadStore, DEFAULT_DOWNLOAD_CAPACITY};
