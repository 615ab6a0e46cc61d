//! HTTP server layer for QR Forge.
//!
//! This module provides the HTTP API for generating and decoding QR codes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │   POST /generate_qr        POST /qr_to_link                     │
//! │   POST /generate_qr_codes/ GET  /download_qr                    │
//! │                                                                 │
//! │      ┌───────────────────┐      ┌────────────────────────┐      │
//! │      │     handlers      │      │         routes         │      │
//! │      │    (requests)     │      │    (router config)     │      │
//! │      └───────────────────┘      └────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    download_qr_handler, email_to_qr_handler, generate_qr_codes_email_handler,
    generate_qr_codes_handler, generate_qr_codes_phone_handler, generate_qr_handler,
    health_handler, mobile_to_qr_handler, qr_to_link_handler, AppState, DecodedLinkResponse,
    DownloadParams, EmailForm, ErrorResponse, GenerateQrParams, HealthResponse, MobileForm,
    DOWNLOAD_TOKEN_HEADER,
};
pub use routes::{create_router, RouterConfig, DEFAULT_MAX_UPLOAD_BYTES};
