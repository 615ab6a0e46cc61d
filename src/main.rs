//! QR Forge - An HTTP service for generating and decoding QR codes.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qr_forge::{
    config::Config,
    qr::{DownloadStore, QrPngEncoder, QrService},
    server::{create_router, RouterConfig},
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("QR Forge v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Module size: {} px", config.module_size);
    info!("  Download store: {} images", config.download_capacity);
    info!("  Batch limit: {} payloads", config.batch_limit);
    info!("  Upload limit: {} bytes", config.max_upload_bytes);

    // Create the QR service
    let encoder = QrPngEncoder::with_module_size(config.module_size);
    let store = DownloadStore::with_capacity(config.download_capacity);
    let service = QrService::with_parts(encoder, store, config.batch_limit);

    // Build router configuration
    let router_config = build_router_config(&config);

    // Create router
    let router = create_router(service, router_config);

    // Bind and serve
    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!(
        "    curl -X POST 'http://{}/generate_qr?url=https://example.com' -o qr.png",
        addr
    );
    info!("    curl -X POST http://{}/qr_to_link -F file=@qr.png", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "qr_forge=debug,tower_http=debug"
    } else {
        "qr_forge=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::new();

    // Apply upload limit
    router_config = router_config.with_max_upload_bytes(config.max_upload_bytes);

    // Apply CORS origins
    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    // Apply tracing setting
    router_config = router_config.with_tracing(!config.no_tracing);

    router_config
}
