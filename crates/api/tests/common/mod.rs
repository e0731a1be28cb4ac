// Each integration test binary compiles its own copy of this module and
// uses a different subset of helpers.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use afisha_api::config::ServerConfig;
use afisha_api::router::build_app_router;
use afisha_api::state::AppState;
use afisha_store::{EventStore, UploadStore};

/// Admin token used by every test app.
pub const TEST_ADMIN_TOKEN: &str = "test-admin-token";

/// A fully wired application over a throwaway directory.
///
/// Holds the temp dir so the storage outlives the test.
pub struct TestApp {
    pub app: Router,
    pub data_file: PathBuf,
    pub uploads_dir: PathBuf,
    _dir: tempfile::TempDir,
}

impl TestApp {
    /// Assemble from externally built parts (used by the proxy tests,
    /// which need a customized config).
    pub fn from_parts(app: Router, config: &ServerConfig, dir: tempfile::TempDir) -> Self {
        Self {
            app,
            data_file: config.data_file.clone(),
            uploads_dir: config.uploads_dir.clone(),
            _dir: dir,
        }
    }
}

/// Build a test `ServerConfig` with safe defaults, rooted in `dir`.
pub fn test_config(dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_file: dir.join("baza_afisha.json"),
        uploads_dir: dir.join("uploads"),
        img_dir: dir.join("img"),
        admin_token: TEST_ADMIN_TOKEN.to_string(),
        intickets_events_url: None,
        intickets_token: None,
        intickets_timeout_secs: 10,
    }
}

/// Build the full application router with all middleware layers over a
/// fresh temp directory.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery) and static mounts that production uses.
pub async fn build_test_app() -> TestApp {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = test_config(dir.path());

    let store = Arc::new(EventStore::new(&config.data_file));
    let uploads = Arc::new(UploadStore::new(&config.uploads_dir));
    uploads.ensure_dir().await.expect("create uploads dir");
    std::fs::create_dir_all(&config.img_dir).expect("create img dir");

    let state = AppState {
        store,
        uploads,
        config: Arc::new(config.clone()),
        http: reqwest::Client::new(),
    };

    TestApp {
        app: build_app_router(state, &config),
        data_file: config.data_file,
        uploads_dir: config.uploads_dir,
        _dir: dir,
    }
}

/// Write the event document directly, bypassing the API.
pub fn seed_document(test_app: &TestApp, document: &Value) {
    std::fs::write(
        &test_app.data_file,
        serde_json::to_vec_pretty(document).expect("serialize document"),
    )
    .expect("seed document");
}

/// GET `uri` with no headers.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request failed")
}

/// POST a JSON body, optionally with a bearer token.
pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: &Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = builder
        .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
        .expect("build request");

    app.clone().oneshot(request).await.expect("request failed")
}

/// POST a hand-rolled multipart body with a single file part.
pub async fn post_multipart(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    field_name: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> Response<Body> {
    const BOUNDARY: &str = "x-test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder().method("POST").uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = builder.body(Body::from(body)).expect("build request");
    app.clone().oneshot(request).await.expect("request failed")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Assert the standard `{ "error": ..., "code": ... }` error envelope.
pub async fn assert_error_body(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error code: {json}");
    assert!(json["error"].is_string());
}
