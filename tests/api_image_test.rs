//! Tests for the /api/image endpoints.

mod common;

use axum::http::StatusCode;
use common::{fixtures, TestApp};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_upload_returns_dimensions_and_session_cookie() {
    let app = TestApp::new();

    let response = app.upload_png(fixtures::solid_png(40, 30, [0, 0, 0])).await;
    common::assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["width"], 40);
    assert_eq!(json["height"], 30);
    assert_eq!(json["max_width"], 40);
    // Configured default (200) is clamped to the image
    assert_eq!(json["default_width"], 40);

    let set_cookie = response.header("set-cookie").expect("Set-Cookie header");
    assert!(set_cookie.starts_with("asciify_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));
}

#[tokio::test]
async fn test_upload_keeps_existing_session() {
    let app = TestApp::new();

    app.upload_png(fixtures::solid_png(4, 4, [0, 0, 0])).await;
    let first = app.cookie().expect("session cookie");

    app.upload_png(fixtures::solid_png(6, 6, [0, 0, 0])).await;
    assert_eq!(app.cookie(), Some(first));
}

#[tokio::test]
async fn test_upload_without_content_type_is_accepted() {
    let app = TestApp::new();
    let response = app
        .post_bytes("/api/image", None, fixtures::solid_png(3, 3, [1, 2, 3]))
        .await;
    common::assert_ok(&response);
}

#[tokio::test]
async fn test_upload_jpeg() {
    let app = TestApp::new();
    let response = app
        .post_bytes(
            "/api/image",
            Some("image/jpeg"),
            fixtures::solid_jpeg(16, 8, [200, 200, 200]),
        )
        .await;
    common::assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["width"], 16);
}

#[tokio::test]
async fn test_upload_non_image_content_type_rejected() {
    let app = TestApp::new();
    let response = app
        .post_bytes("/api/image", Some("text/plain"), b"hello".to_vec())
        .await;
    common::assert_json_error(&response, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_upload_undecodable_bytes_rejected() {
    let app = TestApp::new();
    let response = app
        .post_bytes("/api/image", Some("image/png"), fixtures::NOT_AN_IMAGE.to_vec())
        .await;
    common::assert_json_error(&response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_failed_upload_leaves_previous_output_unchanged() {
    let app = TestApp::new();

    app.upload_png(fixtures::solid_png(8, 8, [0, 0, 0])).await;
    let before = app.get("/api/render?width=4").await.text();

    let response = app
        .post_bytes("/api/image", Some("image/png"), fixtures::NOT_AN_IMAGE.to_vec())
        .await;
    common::assert_status(&response, StatusCode::UNPROCESSABLE_ENTITY);

    let after = app.get("/api/render?width=4").await.text();
    assert_eq!(before, after);

    let json: serde_json::Value = serde_json::from_str(&after).unwrap();
    assert_eq!(json["art"], "@@@@\n@@@@\n");
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let mut config = asciify::models::AppConfig::default();
    config.upload.max_bytes = 32;
    let store = std::sync::Arc::new(asciify::services::InMemorySessionStore::new());
    let app = TestApp::with_config_and_store(config, store);

    let png = fixtures::gradient_png(64, 64);
    assert!(png.len() > 32);

    let response = app.upload_png(png).await;
    common::assert_status(&response, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_get_image_returns_stored_bytes() {
    let app = TestApp::new();
    let png = fixtures::solid_png(5, 5, [10, 20, 30]);

    app.upload_png(png.clone()).await;
    let response = app.get("/api/image").await;

    common::assert_ok(&response);
    assert!(response.is_png());
    assert_eq!(response.header("content-type"), Some("image/png"));
    assert_eq!(response.body, png);
}

#[tokio::test]
async fn test_get_image_sniffs_jpeg() {
    let app = TestApp::new();
    app.post_bytes(
        "/api/image",
        Some("application/octet-stream"),
        fixtures::solid_jpeg(8, 8, [0, 0, 0]),
    )
    .await;

    let response = app.get("/api/image").await;
    common::assert_ok(&response);
    assert_eq!(response.header("content-type"), Some("image/jpeg"));
}

#[tokio::test]
async fn test_get_image_without_session_is_not_found() {
    let app = TestApp::new();
    let response = app.get("/api/image").await;
    common::assert_json_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_image() {
    let app = TestApp::new();
    app.upload_png(fixtures::solid_png(4, 4, [0, 0, 0])).await;

    let response = app.delete("/api/image").await;
    common::assert_status(&response, StatusCode::NO_CONTENT);

    common::assert_status(&app.get("/api/image").await, StatusCode::NOT_FOUND);

    let render = common::assert_render(&app.get("/api/render").await);
    assert_eq!(render["has_image"], false);
    assert_eq!(render["art"], "");
    assert!(app.images.is_empty().await);
}

#[tokio::test]
async fn test_clear_without_session_is_fine() {
    let app = TestApp::new();
    let response = app.delete("/api/image").await;
    common::assert_status(&response, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_api_responses_are_not_cached() {
    let app = TestApp::new();
    let response = app.upload_png(fixtures::solid_png(2, 2, [0, 0, 0])).await;
    assert_eq!(response.header("cache-control"), Some("no-store"));
}

#[tokio::test]
async fn test_many_sessions_stay_bounded() {
    let mut config = asciify::models::AppConfig::default();
    config.session.cached_images = 8;
    let store = std::sync::Arc::new(asciify::services::InMemorySessionStore::with_capacity(10));
    let app = TestApp::with_config_and_store(config, store.clone());

    for _ in 0..50 {
        app.set_cookie(None);
        common::assert_ok(&app.upload_png(fixtures::solid_png(4, 4, [0, 0, 0])).await);
    }

    assert_eq!(app.images.len().await, 8);
    assert_eq!(store.len().await, 10);

    // The latest session is still served
    let json = common::assert_render(&app.get("/api/render?width=4").await);
    assert_eq!(json["art"], "@@@@\n@@@@\n");
}

#[tokio::test]
async fn test_evicted_image_is_decoded_again() {
    let mut config = asciify::models::AppConfig::default();
    config.session.cached_images = 1;
    let store = std::sync::Arc::new(asciify::services::InMemorySessionStore::new());
    let app = TestApp::with_config_and_store(config, store);

    app.upload_png(fixtures::solid_png(4, 4, [0, 0, 0])).await;
    let first = app.cookie();

    app.set_cookie(None);
    app.upload_png(fixtures::solid_png(4, 4, [255, 255, 255])).await;
    assert_eq!(app.images.len().await, 1);

    app.set_cookie(first);
    let json = common::assert_render(&app.get("/api/render?width=4").await);
    assert_eq!(json["art"], "@@@@\n@@@@\n");
    assert_eq!(app.images.len().await, 1);
}
