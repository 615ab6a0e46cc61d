//! HTTP request handlers for the QR API.
//!
//! This module contains the Axum handlers for generating, downloading, and
//! decoding QR symbols.
//!
//! # Endpoints
//!
//! - `POST /qr_to_link` - Decode the QR symbol in an uploaded image
//! - `POST /generate_qr?url=...` - Generate a symbol from a URL
//! - `POST /email_to_qr` - Generate a symbol from an email address (form)
//! - `POST /mobile_to_qr` - Generate a symbol from a phone number (form)
//! - `GET /download_qr?token=...` - Download a previously generated symbol
//! - `POST /generate_qr_codes/?urls=a&urls=b` - Batch generate, zip response
//! - `POST /generate_qr_codes_phone/?phone_numbers=...` - Phone batch
//! - `POST /generate_qr_codes_email/?emails=...` - Email batch
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::QrError;
use crate::qr::{GeneratedQr, QrService};
use crate::validate::PayloadKind;

/// Response header carrying the download token of a generated symbol.
pub const DOWNLOAD_TOKEN_HEADER: &str = "X-Download-Token";

/// Filename presented for single-symbol downloads.
pub const DOWNLOAD_FILENAME: &str = "qr_code.png";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the QR service.
///
/// This is passed to all handlers via Axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    /// The QR service for generation, decoding, and downloads
    pub service: Arc<QrService>,
}

impl AppState {
    /// Create a new application state with the given QR service.
    pub fn new(service: QrService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for `POST /generate_qr`.
#[derive(Debug, Deserialize)]
pub struct GenerateQrParams {
    /// URL payload to embed in the symbol
    #[serde(default)]
    pub url: Option<String>,
}

/// Form body for `POST /email_to_qr`.
#[derive(Debug, Deserialize)]
pub struct EmailForm {
    /// Email payload to embed in the symbol
    #[serde(default)]
    pub email: Option<String>,
}

/// Form body for `POST /mobile_to_qr`.
#[derive(Debug, Deserialize)]
pub struct MobileForm {
    /// Ten-digit phone payload to embed in the symbol
    #[serde(default)]
    pub mobile_number: Option<String>,
}

/// Query parameters for `GET /download_qr`.
#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    /// Token returned in the `X-Download-Token` header of a generation
    #[serde(default)]
    pub token: Option<String>,
}

/// Collect the values of a repeated query key, preserving input order.
///
/// Batch endpoints take their payload lists as repeated parameters
/// (`?urls=a&urls=b`), which arrive as raw key/value pairs.
fn collect_repeated(params: &[(String, String)], key: &str) -> Vec<String> {
    params
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .collect()
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "qr_not_found", "invalid_url")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: None,
        }
    }

    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// Response from the decode endpoint.
#[derive(Debug, Serialize)]
pub struct DecodedLinkResponse {
    /// Text payload extracted from the QR symbol, verbatim
    pub url: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert QrError to HTTP response.
///
/// This implementation logs errors appropriately based on their severity:
/// - 4xx errors are logged at WARN level (client errors)
/// - 404s are logged at DEBUG level (common and expected)
/// - 5xx errors are logged at ERROR level (server errors)
impl IntoResponse for QrError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            // 400 Bad Request - payload failed validation
            QrError::InvalidPayload { kind, value } => (
                StatusCode::BAD_REQUEST,
                match kind {
                    PayloadKind::Url => "invalid_url",
                    PayloadKind::Email => "invalid_email",
                    PayloadKind::Phone => "invalid_phone",
                },
                format!("Invalid {}: {:?}", kind, value),
            ),

            // 400 Bad Request - unusable upload
            QrError::Preprocess(err) => (StatusCode::BAD_REQUEST, "bad_image", err.to_string()),

            QrError::MissingFile => (
                StatusCode::BAD_REQUEST,
                "missing_file",
                "Multipart upload is missing the 'file' field".to_string(),
            ),

            QrError::BadUpload { message } => (
                StatusCode::BAD_REQUEST,
                "bad_upload",
                format!("Malformed multipart upload: {}", message),
            ),

            QrError::UploadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "upload_too_large",
                "Uploaded file exceeds the size limit".to_string(),
            ),

            // 404 Not Found - no usable symbol in the image
            QrError::SymbolNotFound => (
                StatusCode::NOT_FOUND,
                "qr_not_found",
                "No QR code found in the image".to_string(),
            ),

            QrError::SymbolUnreadable { message } => (
                StatusCode::NOT_FOUND,
                "qr_unreadable",
                format!("QR code detected but not readable: {}", message),
            ),

            // 400 Bad Request - malformed batch
            QrError::EmptyBatch => (
                StatusCode::BAD_REQUEST,
                "empty_batch",
                "Batch contains no payloads".to_string(),
            ),

            QrError::BatchTooLarge { count, limit } => (
                StatusCode::BAD_REQUEST,
                "batch_too_large",
                format!("Batch of {} payloads exceeds the limit of {}", count, limit),
            ),

            // Download token errors
            QrError::MissingToken => (
                StatusCode::BAD_REQUEST,
                "missing_token",
                "Missing download token".to_string(),
            ),

            QrError::UnknownToken => (
                StatusCode::NOT_FOUND,
                "unknown_token",
                "No generated QR code for this download token".to_string(),
            ),

            // 500 Internal Server Error - rendering and packing failures
            QrError::Encode(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "encode_error",
                err.to_string(),
            ),

            QrError::Archive(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "archive_error",
                err.to_string(),
            ),
        };

        // Log errors based on severity
        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                message
            );
        } else if status.is_client_error() {
            // Log 404s at debug level (common and expected), others at warn
            if status == StatusCode::NOT_FOUND {
                debug!(
                    error_type = error_type,
                    status = status.as_u16(),
                    "Resource not found: {}",
                    message
                );
            } else {
                warn!(
                    error_type = error_type,
                    status = status.as_u16(),
                    "Client error: {}",
                    message
                );
            }
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);

        (status, Json(error_response)).into_response()
    }
}

/// Map a multipart extraction failure onto the service taxonomy.
///
/// Body-limit overruns surface as 413 from the extractor and keep that
/// status; everything else is a malformed upload.
fn multipart_error(err: MultipartError) -> QrError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        QrError::UploadTooLarge
    } else {
        QrError::BadUpload {
            message: err.body_text(),
        }
    }
}

// =============================================================================
// Response Builders
// =============================================================================

/// Build a PNG response for a freshly generated symbol.
///
/// The download token travels in the `X-Download-Token` header so the
/// client can fetch the same bytes again via `GET /download_qr`.
fn png_response(generated: GeneratedQr) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/png")
        .header(DOWNLOAD_TOKEN_HEADER, generated.token)
        .body(Body::from(generated.data))
        .unwrap()
}

/// Build a zip attachment response for a batch archive.
fn zip_response(archive: Bytes, filename: &str) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from(archive))
        .unwrap()
}

/// Run a batch generation and wrap the archive as a zip attachment.
fn batch_response(
    state: &AppState,
    kind: PayloadKind,
    payloads: Vec<String>,
    filename: &str,
) -> Result<Response, QrError> {
    let archive = state.service.generate_batch(kind, &payloads)?;
    info!(
        kind = %kind,
        count = payloads.len(),
        bytes = archive.len(),
        "generated QR batch"
    );
    Ok(zip_response(archive, filename))
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle decode requests.
///
/// # Endpoint
///
/// `POST /qr_to_link`
///
/// # Request
///
/// Multipart form with a `file` field holding a PNG or JPEG photo.
///
/// # Response
///
/// - `200 OK`: `{"url": "<decoded text>"}` (the payload is returned verbatim
///   even when it is not URL-shaped)
/// - `400 Bad Request`: missing `file` field, malformed multipart body, or
///   bytes that do not decode as an image
/// - `404 Not Found`: no readable QR symbol in the image
/// - `413 Payload Too Large`: upload exceeds the body limit
pub async fn qr_to_link_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DecodedLinkResponse>, QrError> {
    let mut upload: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("file") {
            upload = Some(field.bytes().await.map_err(multipart_error)?);
            break;
        }
    }

    let upload = upload.ok_or(QrError::MissingFile)?;
    let url = state.service.decode(&upload)?;

    Ok(Json(DecodedLinkResponse { url }))
}

/// Handle URL generation requests.
///
/// # Endpoint
///
/// `POST /generate_qr?url=https://example.com`
///
/// # Query Parameters
///
/// - `url`: the URL payload (a missing parameter is validated as the empty
///   string and rejected)
///
/// # Response
///
/// - `200 OK`: PNG symbol with `Content-Type: image/png`
/// - `400 Bad Request`: payload failed URL validation
/// - `500 Internal Server Error`: rendering failure
///
/// # Headers
///
/// - `X-Download-Token: <token>` for `GET /download_qr`
pub async fn generate_qr_handler(
    State(state): State<AppState>,
    Query(params): Query<GenerateQrParams>,
) -> Result<Response, QrError> {
    let payload = params.url.unwrap_or_default();
    let generated = state.service.generate(PayloadKind::Url, &payload).await?;

    debug!(bytes = generated.data.len(), "generated URL symbol");
    Ok(png_response(generated))
}

/// Handle email generation requests.
///
/// # Endpoint
///
/// `POST /email_to_qr` with form body `email=user@example.com`
///
/// # Response
///
/// Same shape as `POST /generate_qr`, with `invalid_email` on validation
/// failure.
pub async fn email_to_qr_handler(
    State(state): State<AppState>,
    Form(form): Form<EmailForm>,
) -> Result<Response, QrError> {
    let payload = form.email.unwrap_or_default();
    let generated = state.service.generate(PayloadKind::Email, &payload).await?;

    debug!(bytes = generated.data.len(), "generated email symbol");
    Ok(png_response(generated))
}

/// Handle phone generation requests.
///
/// # Endpoint
///
/// `POST /mobile_to_qr` with form body `mobile_number=0123456789`
///
/// # Response
///
/// Same shape as `POST /generate_qr`, with `invalid_phone` on validation
/// failure.
pub async fn mobile_to_qr_handler(
    State(state): State<AppState>,
    Form(form): Form<MobileForm>,
) -> Result<Response, QrError> {
    let payload = form.mobile_number.unwrap_or_default();
    let generated = state.service.generate(PayloadKind::Phone, &payload).await?;

    debug!(bytes = generated.data.len(), "generated phone symbol");
    Ok(png_response(generated))
}

/// Handle download requests for previously generated symbols.
///
/// # Endpoint
///
/// `GET /download_qr?token=<token>`
///
/// # Query Parameters
///
/// - `token`: value of the `X-Download-Token` header from a generation
///
/// # Response
///
/// - `200 OK`: the stored PNG as an attachment named `qr_code.png`
/// - `400 Bad Request`: no token supplied
/// - `404 Not Found`: token unknown or its entry evicted
pub async fn download_qr_handler(
    State(state): State<AppState>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, QrError> {
    let token = params
        .token
        .filter(|t| !t.is_empty())
        .ok_or(QrError::MissingToken)?;

    let data = state.service.download(&token).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/png")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
        )
        .body(Body::from(data))
        .unwrap();

    Ok(response)
}

/// Handle URL batch generation requests.
///
/// # Endpoint
///
/// `POST /generate_qr_codes/?urls=http://a.com&urls=http://b.com`
///
/// # Response
///
/// - `200 OK`: zip attachment `qr_codes.zip` with entries
///   `qr_code_url_<N>.png`, 1-indexed in input order
/// - `400 Bad Request`: empty batch, batch over the limit, or the first
///   invalid payload (nothing is generated in that case)
pub async fn generate_qr_codes_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, QrError> {
    let payloads = collect_repeated(&params, "urls");
    batch_response(&state, PayloadKind::Url, payloads, "qr_codes.zip")
}

/// Handle phone batch generation requests.
///
/// # Endpoint
///
/// `POST /generate_qr_codes_phone/?phone_numbers=0123456789&phone_numbers=...`
///
/// # Response
///
/// Same shape as the URL batch, with archive `qr_codes_phone.zip` and
/// entries `qr_code_phone_<N>.png`.
pub async fn generate_qr_codes_phone_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, QrError> {
    let payloads = collect_repeated(&params, "phone_numbers");
    batch_response(&state, PayloadKind::Phone, payloads, "qr_codes_phone.zip")
}

/// Handle email batch generation requests.
///
/// # Endpoint
///
/// `POST /generate_qr_codes_email/?emails=a@b.com&emails=c@d.org`
///
/// # Response
///
/// Same shape as the URL batch, with archive `qr_codes_email.zip` and
/// entries `qr_code_email_<N>.png`.
pub async fn generate_qr_codes_email_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, QrError> {
    let payloads = collect_repeated(&params, "emails");
    batch_response(&state, PayloadKind::Email, payloads, "qr_codes_email.zip")
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
