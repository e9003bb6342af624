//! Integration tests for the HTTP API.
//!
//! Requests go straight into the router with `tower::ServiceExt::oneshot`;
//! no socket is bound.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use mockup::compose::InsetConfig;
use mockup::config::ServerConfig;
use mockup::frames::Orientation;
use mockup::server::{router, HttpState};
use mockup::service::MockupService;
use serde_json::Value;
use tower::ServiceExt;

use crate::common::fixtures::{screenshot_png, TestFrames, FRAME_SIZE};
use crate::common::init_test_logging;

const BOUNDARY: &str = "mockup-test-boundary";

enum Part<'a> {
    File(&'a str, &'a [u8]),
    Text(&'a str),
}

fn multipart(parts: &[(&str, Part<'_>)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, part) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File(file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
            Part::Text(value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn post(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn app(frames: &TestFrames, config: &ServerConfig) -> Router {
    let service = MockupService::new(frames.store(), InsetConfig::default(), "17");
    router(HttpState::new(service), config).unwrap()
}

fn default_app(frames: &TestFrames) -> Router {
    app(frames, &ServerConfig::default())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check() {
    init_test_logging();
    let frames = TestFrames::new();
    let response = default_app(&frames).oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["message"], "Device Mockup API");
}

#[tokio::test]
async fn models_are_keyed_by_name_in_catalog_order() {
    init_test_logging();
    let frames = TestFrames::new();
    let response = default_app(&frames).oneshot(get("/models")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let first = text.find("\"iPhone 16\":").unwrap();
    let last = text.find("\"iPhone 17 Pro Max\":").unwrap();
    assert!(first < last);

    let json: Value = serde_json::from_str(&text).unwrap();
    let models = json["models"].as_object().unwrap();
    assert_eq!(models.len(), 8);
    assert_eq!(models["iPhone 17"]["resolution"], serde_json::json!([1206, 2622]));
}

#[tokio::test]
async fn detect_returns_model_details() {
    init_test_logging();
    let frames = TestFrames::new();
    let png = screenshot_png(1206, 2622);
    let body = multipart(&[("file", Part::File("shot.png", &png))]);

    let response = default_app(&frames).oneshot(post("/detect", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["detected_model"], "iPhone 17");
    assert_eq!(json["series"], "17");
    assert_eq!(json["resolution"], serde_json::json!([1206, 2622]));
    assert_eq!(json["all_matches"].as_array().map(Vec::len), Some(6));
    assert!(json["colors"].as_array().unwrap().iter().any(|c| c == "Sage"));
}

#[tokio::test]
async fn detect_failure_is_bad_request() {
    init_test_logging();
    let frames = TestFrames::new();
    let png = screenshot_png(100, 100);
    let body = multipart(&[("file", Part::File("square.png", &png))]);

    let response = default_app(&frames).oneshot(post("/detect", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], true);
    assert!(json["message"].as_str().unwrap().contains("100x100"));
    assert!(json["suggestion"].is_string());
}

#[tokio::test]
async fn detect_without_file_is_bad_request() {
    init_test_logging();
    let frames = TestFrames::new();
    let body = multipart(&[("color", Part::Text("Sage"))]);

    let response = default_app(&frames).oneshot(post("/detect", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Missing required field: file");
}

#[tokio::test]
async fn undecodable_upload_is_bad_request() {
    init_test_logging();
    let frames = TestFrames::new();
    let body = multipart(&[("file", Part::File("shot.png", b"not a png"))]);

    let response = default_app(&frames).oneshot(post("/detect", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_returns_png_attachment() {
    init_test_logging();
    let frames = TestFrames::new().with("iPhone 17", "Sage", Orientation::Portrait);
    let png = screenshot_png(603, 1311);
    let body = multipart(&[
        ("file", Part::File("shot.png", &png)),
        ("color", Part::Text("Sage")),
    ]);

    let response = default_app(&frames).oneshot(post("/generate", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"mockup-iPhone 17-Sage.png\""
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let image = image::load_from_memory(&bytes).unwrap();
    assert_eq!((image.width(), image.height()), FRAME_SIZE);
}

#[tokio::test]
async fn generate_accepts_explicit_model_and_orientation() {
    init_test_logging();
    let frames = TestFrames::new().with("iPhone 16 Pro Max", "Desert Titanium", Orientation::Landscape);
    let png = screenshot_png(64, 32);
    let body = multipart(&[
        ("file", Part::File("shot.png", &png)),
        ("color", Part::Text("Desert Titanium")),
        ("model", Part::Text("iPhone 16 Pro Max")),
        ("orientation", Part::Text("Landscape")),
    ]);

    let response = default_app(&frames).oneshot(post("/generate", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let image = image::load_from_memory(&bytes).unwrap();
    assert_eq!((image.width(), image.height()), (FRAME_SIZE.1, FRAME_SIZE.0));
}

#[tokio::test]
async fn generate_rejects_bad_requests() {
    init_test_logging();
    let frames = TestFrames::new().with("iPhone 17", "Sage", Orientation::Portrait);
    let png = screenshot_png(603, 1311);

    let cases = [
        (vec![("file", Part::File("shot.png", &png))], StatusCode::BAD_REQUEST, "color"),
        (
            vec![
                ("file", Part::File("shot.png", &png)),
                ("color", Part::Text("Gold")),
            ],
            StatusCode::BAD_REQUEST,
            "Gold",
        ),
        (
            vec![
                ("file", Part::File("shot.png", &png)),
                ("color", Part::Text("Sage")),
                ("model", Part::Text("Pixel 9")),
            ],
            StatusCode::BAD_REQUEST,
            "Pixel 9",
        ),
        (
            vec![
                ("file", Part::File("shot.png", &png)),
                ("color", Part::Text("Sage")),
                ("orientation", Part::Text("Upside")),
            ],
            StatusCode::BAD_REQUEST,
            "orientation",
        ),
        (
            vec![
                ("file", Part::File("shot.png", &png)),
                ("color", Part::Text("White")),
            ],
            StatusCode::NOT_FOUND,
            "Frame not found",
        ),
    ];

    for (parts, status, needle) in cases {
        let response = default_app(&frames)
            .oneshot(post("/generate", multipart(&parts)))
            .await
            .unwrap();
        assert_eq!(response.status(), status, "case {needle}");
        let json = body_json(response).await;
        assert_eq!(json["error"], true);
        assert!(
            json["message"].as_str().unwrap().contains(needle),
            "message {} lacks {needle}",
            json["message"]
        );
    }
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    init_test_logging();
    let frames = TestFrames::new().with("iPhone 17", "Sage", Orientation::Portrait);
    let config = ServerConfig {
        max_upload_bytes: 64,
        ..ServerConfig::default()
    };
    let payload = vec![7_u8; 4096];
    let body = multipart(&[("file", Part::File("shot.png", &payload))]);

    let response = app(&frames, &config).oneshot(post("/detect", body)).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    init_test_logging();
    let frames = TestFrames::new();
    let request = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = default_app(&frames).oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
}
