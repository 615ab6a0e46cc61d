//! Integration tests for download token redemption.
//!
//! Tests verify:
//! - Generated images can be re-fetched with the returned token
//! - Tokens survive repeated redemption
//! - Missing and unknown tokens produce distinct errors
//! - Old tokens disappear once the store evicts their entries

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use qr_forge::qr::{DownloadStore, QrPngEncoder, QrService};

use super::test_utils::{test_router, test_router_with};

/// Generate a QR for `url` and return the download token plus the PNG bytes.
async fn generate(router: axum::Router, url: &str) -> (String, bytes::Bytes) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/generate_qr?url={}", url))
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let token = response
        .headers()
        .get("x-download-token")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (token, body)
}

// =============================================================================
// Redemption
// =============================================================================

#[tokio::test]
async fn test_download_roundtrip() {
    let router = test_router();

    let (token, generated) = generate(router.clone(), "https://example.com").await;

    let request = Request::builder()
        .uri(format!("/download_qr?token={}", token))
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/png"
    );
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"qr_code.png\""
    );

    // The stored bytes are exactly the generated bytes
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body, generated);
}

#[tokio::test]
async fn test_download_repeated_redemption() {
    let router = test_router();

    let (token, generated) = generate(router.clone(), "https://example.com").await;

    // Redeeming does not consume the token
    for _ in 0..2 {
        let request = Request::builder()
            .uri(format!("/download_qr?token={}", token))
            .body(Body::empty())
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, generated);
    }
}

// =============================================================================
// Token Errors
// =============================================================================

#[tokio::test]
async fn test_download_unknown_token() {
    let router = test_router();

    let request = Request::builder()
        .uri("/download_qr?token=no-such-token")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "unknown_token");
}

#[tokio::test]
async fn test_download_missing_token() {
    let router = test_router();

    let request = Request::builder()
        .uri("/download_qr")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "missing_token");
}

#[tokio::test]
async fn test_download_empty_token() {
    let router = test_router();

    // An empty token value is treated as missing
    let request = Request::builder()
        .uri("/download_qr?token=")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "missing_token");
}

// =============================================================================
// Eviction
// =============================================================================

#[tokio::test]
async fn test_download_eviction() {
    // A store that only remembers one image
    let service = QrService::with_parts(QrPngEncoder::new(), DownloadStore::with_capacity(1), 100);
    let router = test_router_with(service);

    let (first_token, _) = generate(router.clone(), "https://example.com").await;
    let (second_token, second_bytes) = generate(router.clone(), "https://rust-lang.org").await;

    // The first entry was evicted to make room for the second
    let request = Request::builder()
        .uri(format!("/download_qr?token={}", first_token))
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The second entry is still available
    let request = Request::builder()
        .uri(format!("/download_qr?token={}", second_token))
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body, second_bytes);
}
