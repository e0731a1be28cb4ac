//! Integration tests for the Intickets proxy endpoint.
//!
//! The live upstream is not reachable from tests; these cover the
//! configuration guard. The parameter allow-list and status pass-through
//! are exercised against a local axum upstream.

mod common;

use std::sync::Arc;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{assert_error_body, body_json, build_test_app, get as send_get, test_config};
use serde_json::json;

use afisha_api::router::build_app_router;
use afisha_api::state::AppState;
use afisha_store::{EventStore, UploadStore};

// ---------------------------------------------------------------------------
// Test: unconfigured upstream returns 503
// ---------------------------------------------------------------------------

#[tokio::test]
async fn proxy_without_upstream_returns_503() {
    let test_app = build_test_app().await;
    let response = send_get(&test_app.app, "/api/intickets/events").await;

    assert_error_body(
        response,
        StatusCode::SERVICE_UNAVAILABLE,
        "UPSTREAM_UNCONFIGURED",
    )
    .await;
}

// ---------------------------------------------------------------------------
// Local upstream fixture
// ---------------------------------------------------------------------------

/// Serve a fake Intickets feed on an ephemeral port and return its URL.
async fn spawn_upstream() -> String {
    async fn events(
        Query(params): Query<std::collections::HashMap<String, String>>,
    ) -> Json<serde_json::Value> {
        Json(json!({ "events": [], "echo": params }))
    }

    let router = Router::new().route("/v1/events", get(events));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}/v1/events")
}

/// Build a test app pointing the proxy at `upstream_url`.
async fn build_proxied_app(upstream_url: String) -> common::TestApp {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.intickets_events_url = Some(upstream_url);

    let store = Arc::new(EventStore::new(&config.data_file));
    let uploads = Arc::new(UploadStore::new(&config.uploads_dir));
    uploads.ensure_dir().await.unwrap();
    std::fs::create_dir_all(&config.img_dir).unwrap();

    let state = AppState {
        store,
        uploads,
        config: Arc::new(config.clone()),
        http: reqwest::Client::new(),
    };

    common::TestApp::from_parts(build_app_router(state, &config), &config, dir)
}

// ---------------------------------------------------------------------------
// Test: allow-listed params are forwarded, others dropped
// ---------------------------------------------------------------------------

#[tokio::test]
async fn proxy_forwards_only_allowed_params() {
    let upstream = spawn_upstream().await;
    let test_app = build_proxied_app(upstream).await;

    let response = send_get(
        &test_app.app,
        "/api/intickets/events?city=moscow&limit=5&evil=1&empty=",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(axum::http::header::CACHE_CONTROL)
            .unwrap(),
        "s-maxage=300, stale-while-revalidate=600"
    );

    let json = body_json(response).await;
    assert_eq!(json["echo"]["city"], "moscow");
    assert_eq!(json["echo"]["limit"], "5");
    assert!(json["echo"].get("evil").is_none());
    assert!(json["echo"].get("empty").is_none());
}

// ---------------------------------------------------------------------------
// Test: upstream error status passes through
// ---------------------------------------------------------------------------

#[tokio::test]
async fn proxy_passes_upstream_error_status_through() {
    async fn failing() -> (StatusCode, &'static str) {
        (StatusCode::IM_A_TEAPOT, "no events today")
    }

    let router = Router::new().route("/v1/events", get(failing));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let test_app = build_proxied_app(format!("http://{addr}/v1/events")).await;
    let response = send_get(&test_app.app, "/api/intickets/events").await;

    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["details"], "no events today");
}
