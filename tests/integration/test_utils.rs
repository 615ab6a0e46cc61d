//! Test utilities for integration tests.
//!
//! This module provides helper functions for building routers, QR image
//! fixtures, multipart request bodies, and for inspecting PNG and zip
//! responses.

use std::io::{Cursor, Read};

use axum::Router;
use image::codecs::png::PngEncoder;
use image::{Luma, Rgb, RgbImage};
use qrcode::QrCode;

use qr_forge::qr::QrService;
use qr_forge::server::{create_router, RouterConfig};

// =============================================================================
// Router Builders
// =============================================================================

/// Build a router with default service settings.
pub fn test_router() -> Router {
    create_router(QrService::new(), RouterConfig::new())
}

/// Build a router around a pre-configured service.
pub fn test_router_with(service: QrService) -> Router {
    create_router(service, RouterConfig::new())
}

// =============================================================================
// Image Fixtures
// =============================================================================

/// Render `payload` as a QR code PNG.
///
/// Uses the default error correction level (M), which is sturdier than the
/// service's own output and makes upload fixtures survive preprocessing.
pub fn qr_png(payload: &str) -> Vec<u8> {
    let code = QrCode::new(payload).expect("payload fits in a QR symbol");
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(10, 10)
        .quiet_zone(true)
        .build();

    let mut buffer = Vec::new();
    image
        .write_with_encoder(PngEncoder::new(&mut buffer))
        .expect("in-memory PNG encoding");
    buffer
}

/// Render a gradient "photo" PNG that contains no QR symbol.
pub fn photo_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });

    let mut buffer = Vec::new();
    image
        .write_with_encoder(PngEncoder::new(&mut buffer))
        .expect("in-memory PNG encoding");
    buffer
}

// =============================================================================
// Multipart Helpers
// =============================================================================

const MULTIPART_BOUNDARY: &str = "qr-forge-test-boundary-7MA4YWxkTrZu0gW";

/// Content-Type header value matching [`multipart_body`].
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY)
}

/// Build a multipart/form-data body with a single file part.
pub fn multipart_body(field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}

// =============================================================================
// Response Inspection
// =============================================================================

/// Check whether `data` starts with the PNG magic bytes.
pub fn is_valid_png(data: &[u8]) -> bool {
    data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])
}

/// Decode a single QR symbol out of a PNG or JPEG image.
pub fn decode_qr(data: &[u8]) -> String {
    let image = image::load_from_memory(data)
        .expect("valid image")
        .to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare(image);
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one QR symbol");

    let (_, content) = grids[0].decode().expect("decodable QR symbol");
    content
}

/// Unpack a zip archive into (name, content) pairs in archive order.
pub fn unpack_zip(data: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data.to_vec())).expect("valid zip");

    let mut entries = Vec::new();
    for index in 0..archive.len() {
        let mut file = archive.by_index(index).expect("readable zip entry");
        let mut content = Vec::new();
        file.read_to_end(&mut content).expect("zip entry content");
        entries.push((file.name().to_string(), content));
    }
    entries
}
