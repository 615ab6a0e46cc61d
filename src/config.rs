//! Configuration management for QR Forge.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `QRF_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use qr_forge::config::Config;
//!
//! // Parse from command line and environment
//! let config = Config::parse();
//!
//! // Access configuration
//! println!("Listening on {}:{}", config.host, config.port);
//! println!("Module size: {} px", config.module_size);
//! ```
//!
//! # Environment Variables
//!
//! All configuration options can be set via environment variables with the `QRF_` prefix:
//!
//! - `QRF_HOST` - Server bind address (default: 0.0.0.0)
//! - `QRF_PORT` - Server port (default: 3000)
//! - `QRF_MODULE_SIZE` - Pixels per QR module (default: 10)
//! - `QRF_DOWNLOAD_CAPACITY` - Max stored downloadable images (default: 256)
//! - `QRF_BATCH_LIMIT` - Max payloads per batch request (default: 100)
//! - `QRF_MAX_UPLOAD_BYTES` - Upload body limit in bytes (default: 8388608)
//! - `QRF_CORS_ORIGINS` - Allowed CORS origins, comma-separated

use clap::Parser;

use crate::qr::{DEFAULT_BATCH_LIMIT, DEFAULT_DOWNLOAD_CAPACITY, DEFAULT_MODULE_SIZE};
use crate::server::DEFAULT_MAX_UPLOAD_BYTES;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

// =============================================================================
// CLI Arguments
// =============================================================================

/// QR Forge - An HTTP service for generating and decoding QR codes.
///
/// Generates PNG QR codes from URLs, email addresses, and phone numbers,
/// packs batches into zip archives, and decodes QR symbols from uploaded
/// photos.
#[derive(Parser, Debug, Clone)]
#[command(name = "qr-forge")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "QRF_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "QRF_PORT")]
    pub port: u16,

    // =========================================================================
    // QR Configuration
    // =========================================================================
    /// Pixels per QR module in generated images (1-50).
    #[arg(long, default_value_t = DEFAULT_MODULE_SIZE, env = "QRF_MODULE_SIZE")]
    pub module_size: u32,

    /// Maximum number of generated images kept for download.
    #[arg(long, default_value_t = DEFAULT_DOWNLOAD_CAPACITY, env = "QRF_DOWNLOAD_CAPACITY")]
    pub download_capacity: usize,

    /// Maximum number of payloads accepted per batch request.
    #[arg(long, default_value_t = DEFAULT_BATCH_LIMIT, env = "QRF_BATCH_LIMIT")]
    pub batch_limit: usize,

    // =========================================================================
    // Upload Configuration
    // =========================================================================
    /// Maximum accepted request body size in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES, env = "QRF_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: usize,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "QRF_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        // Validate module size
        if self.module_size == 0 || self.module_size > 50 {
            return Err("module_size must be between 1 and 50".to_string());
        }

        // Validate store and batch bounds
        if self.download_capacity == 0 {
            return Err("download_capacity must be greater than 0".to_string());
        }
        if self.batch_limit == 0 {
            return Err("batch_limit must be greater than 0".to_string());
        }

        // Validate upload limit (must be large enough for a real photo,
        // small enough to not invite abuse)
        if self.max_upload_bytes < 1024 || self.max_upload_bytes > 64 * 1024 * 1024 {
            return Err("max_upload_bytes must be between 1KB and 64MB".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
