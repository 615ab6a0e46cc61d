//! Router configuration for the QR service.
//!
//! This module defines the HTTP routes and applies middleware for CORS,
//! request tracing, and the upload body limit.
//!
//! # Route Structure
//!
//! ```text
//! /health                       - Health check
//! /qr_to_link                   - Decode an uploaded image (POST, multipart)
//! /generate_qr                  - Generate from URL (POST, query)
//! /email_to_qr                  - Generate from email (POST, form)
//! /mobile_to_qr                 - Generate from phone (POST, form)
//! /download_qr                  - Redeem a download token (GET)
//! /generate_qr_codes/           - URL batch, zip response (POST)
//! /generate_qr_codes_phone/     - Phone batch, zip response (POST)
//! /generate_qr_codes_email/     - Email batch, zip response (POST)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use qr_forge::server::routes::{create_router, RouterConfig};
//! use qr_forge::qr::QrService;
//!
//! let service = QrService::new();
//!
//! let config = RouterConfig::new()
//!     .with_cors_origins(vec!["https://example.com".to_string()]);
//!
//! let router = create_router(service, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use http::header::CONTENT_TYPE;
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    download_qr_handler, email_to_qr_handler, generate_qr_codes_email_handler,
    generate_qr_codes_handler, generate_qr_codes_phone_handler, generate_qr_handler,
    health_handler, mobile_to_qr_handler, qr_to_link_handler, AppState,
};
use crate::qr::QrService;

/// Default upload body limit: 8MB, plenty for a phone photo.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Maximum accepted request body size in bytes (uploads)
    pub max_upload_bytes: usize,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a router configuration with defaults.
    ///
    /// By default:
    /// - CORS allows any origin
    /// - Uploads are capped at 8MB
    /// - Tracing is enabled
    pub fn new() -> Self {
        Self {
            cors_origins: None, // Allow any origin by default
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    /// Pass None (or don't call this method) to allow any origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Set the maximum accepted request body size in bytes.
    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - The QR API routes and the health check
/// - An upload body limit
/// - CORS configuration
/// - Request tracing (optional)
///
/// # Arguments
///
/// * `service` - The QR service backing all handlers
/// * `config` - Router configuration
///
/// # Returns
///
/// A configured Axum router ready to be served.
pub fn create_router(service: QrService, config: RouterConfig) -> Router {
    let app_state = AppState::new(service);

    // Build CORS layer
    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/qr_to_link", post(qr_to_link_handler))
        .route("/generate_qr", post(generate_qr_handler))
        .route("/email_to_qr", post(email_to_qr_handler))
        .route("/mobile_to_qr", post(mobile_to_qr_handler))
        .route("/download_qr", get(download_qr_handler))
        .route("/generate_qr_codes/", post(generate_qr_codes_handler))
        .route(
            "/generate_qr_codes_phone/",
            post(generate_qr_codes_phone_handler),
        )
        .route(
            "/generate_qr_codes_email/",
            post(generate_qr_codes_email_handler),
        )
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(app_state)
        .layer(cors);

    // Add tracing if enabled
    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => {
            // No origins allowed - this effectively disables CORS
            cors
        }
        Some(origins) => {
            // Parse origins into HeaderValues
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
