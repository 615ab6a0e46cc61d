//! API integration tests for single QR generation and decoding.
//!
//! Tests verify:
//! - PNG generation from URL, email, and phone payloads
//! - Payload validation (HTTP 400 with a JSON error body)
//! - Decoding uploaded photos via multipart
//! - The upload body limit (HTTP 413)
//! - HTTP response codes and headers

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use qr_forge::qr::QrService;
use qr_forge::server::{create_router, RouterConfig};

use super::test_utils::{
    decode_qr, is_valid_png, multipart_body, multipart_content_type, photo_png, qr_png,
    test_router,
};

// =============================================================================
// Health Endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let router = test_router();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert!(health["version"].is_string());
}

// =============================================================================
// URL Generation
// =============================================================================

#[tokio::test]
async fn test_generate_qr_success() {
    let router = test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/generate_qr?url=https://example.com")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Verify content type and the download token header
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/png"
    );
    let token = response.headers().get("x-download-token").unwrap();
    assert!(!token.to_str().unwrap().is_empty());

    // Verify the body is a PNG holding the payload
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(is_valid_png(&body), "Response should be a valid PNG");
    assert_eq!(decode_qr(&body), "https://example.com");
}

#[tokio::test]
async fn test_generate_qr_invalid_url() {
    let router = test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/generate_qr?url=notaurl")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "invalid_url");
    assert!(error["message"].as_str().unwrap().contains("notaurl"));
}

#[tokio::test]
async fn test_generate_qr_missing_url() {
    let router = test_router();

    // No query string at all
    let request = Request::builder()
        .method(Method::POST)
        .uri("/generate_qr")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "invalid_url");
}

#[tokio::test]
async fn test_generate_qr_schemeless_url_rejected() {
    let router = test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/generate_qr?url=example.com")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "invalid_url");
}

// =============================================================================
// Email Generation
// =============================================================================

#[tokio::test]
async fn test_email_to_qr_success() {
    let router = test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/email_to_qr")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("email=user%40example.com"))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/png"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(is_valid_png(&body));
    assert_eq!(decode_qr(&body), "user@example.com");
}

#[tokio::test]
async fn test_email_to_qr_invalid() {
    let router = test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/email_to_qr")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("email=not-an-email"))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "invalid_email");
}

#[tokio::test]
async fn test_email_to_qr_missing_field() {
    let router = test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/email_to_qr")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "invalid_email");
}

// =============================================================================
// Phone Generation
// =============================================================================

#[tokio::test]
async fn test_mobile_to_qr_success() {
    let router = test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/mobile_to_qr")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("mobile_number=4155552671"))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/png"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(is_valid_png(&body));
    assert_eq!(decode_qr(&body), "4155552671");
}

#[tokio::test]
async fn test_mobile_to_qr_invalid() {
    let router = test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/mobile_to_qr")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("mobile_number=555-1234"))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "invalid_phone");
}

// =============================================================================
// Decoding Uploads
// =============================================================================

#[tokio::test]
async fn test_qr_to_link_success() {
    let router = test_router();

    let upload = qr_png("https://rust-lang.org");
    let body = multipart_body("file", "qr.png", &upload);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/qr_to_link")
        .header("content-type", multipart_content_type())
        .body(Body::from(body))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let decoded: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(decoded["url"], "https://rust-lang.org");
}

#[tokio::test]
async fn test_qr_to_link_non_url_payload() {
    let router = test_router();

    // Decoding returns whatever the symbol holds, URL or not
    let upload = qr_png("hello world");
    let body = multipart_body("file", "note.png", &upload);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/qr_to_link")
        .header("content-type", multipart_content_type())
        .body(Body::from(body))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let decoded: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(decoded["url"], "hello world");
}

#[tokio::test]
async fn test_qr_to_link_no_symbol() {
    let router = test_router();

    let upload = photo_png(320, 240);
    let body = multipart_body("file", "photo.png", &upload);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/qr_to_link")
        .header("content-type", multipart_content_type())
        .body(Body::from(body))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "qr_not_found");
}

#[tokio::test]
async fn test_qr_to_link_garbage_upload() {
    let router = test_router();

    let body = multipart_body("file", "junk.png", b"this is not an image");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/qr_to_link")
        .header("content-type", multipart_content_type())
        .body(Body::from(body))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "bad_image");
}

#[tokio::test]
async fn test_qr_to_link_missing_file_field() {
    let router = test_router();

    // A multipart body whose only part is named "something_else"
    let upload = qr_png("https://example.com");
    let body = multipart_body("something_else", "qr.png", &upload);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/qr_to_link")
        .header("content-type", multipart_content_type())
        .body(Body::from(body))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "missing_file");
}

#[tokio::test]
async fn test_qr_to_link_oversized_upload() {
    // A router that only accepts 1 KiB bodies
    let router = create_router(
        QrService::new(),
        RouterConfig::new().with_max_upload_bytes(1024),
    );

    let upload = vec![0u8; 64 * 1024];
    let body = multipart_body("file", "big.png", &upload);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/qr_to_link")
        .header("content-type", multipart_content_type())
        .body(Body::from(body))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "upload_too_large");
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn test_unknown_route() {
    let router = test_router();

    let request = Request::builder()
        .uri("/no_such_route")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generate_qr_wrong_method() {
    let router = test_router();

    // Generation endpoints are POST-only
    let request = Request::builder()
        .method(Method::GET)
        .uri("/generate_qr?url=https://example.com")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
