//! Proxy for the Intickets events feed.
//!
//! The widget cannot call the ticketing API directly (CORS + credential
//! secrecy), so this endpoint fronts it: forwards an allow-listed subset
//! of query parameters, attaches the configured bearer token, and passes
//! upstream failures through with their status.

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters forwarded upstream; everything else is dropped.
const ALLOWED_QUERY_PARAMS: &[&str] = &[
    "limit",
    "page",
    "city",
    "venue",
    "category",
    "date_from",
    "date_to",
    "project",
    "search",
    "sort",
];

/// Cache policy attached to successful proxy responses.
const CACHE_CONTROL: &str = "s-maxage=300, stale-while-revalidate=600";

/// GET /api/intickets/events
///
/// 503 when no upstream URL is configured, 504 on upstream timeout;
/// upstream non-2xx statuses pass through with a JSON error body.
pub async fn proxy_events(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Response> {
    let Some(base) = state.config.intickets_events_url.as_deref() else {
        return Err(AppError::UpstreamUnconfigured(
            "INTICKETS_EVENTS_URL is not configured".into(),
        ));
    };

    let mut url = reqwest::Url::parse(base)
        .map_err(|e| AppError::InternalError(format!("Invalid INTICKETS_EVENTS_URL: {e}")))?;
    {
        let mut query = url.query_pairs_mut();
        for (key, value) in &params {
            if ALLOWED_QUERY_PARAMS.contains(&key.as_str()) && !value.is_empty() {
                query.append_pair(key, value);
            }
        }
    }

    let mut request = state
        .http
        .get(url)
        .header(header::ACCEPT, "application/json")
        .timeout(Duration::from_secs(state.config.intickets_timeout_secs));

    if let Some(token) = state.config.intickets_token.as_deref() {
        let value = if token.starts_with("Bearer ") {
            token.to_string()
        } else {
            format!("Bearer {token}")
        };
        request = request.header(header::AUTHORIZATION, value);
    }

    let upstream = request.send().await.map_err(|err| {
        if err.is_timeout() {
            AppError::UpstreamTimeout("The Intickets feed did not answer in time".into())
        } else {
            AppError::UpstreamFailed(format!("Unable to fetch events from Intickets: {err}"))
        }
    })?;

    let status = upstream.status();
    if !status.is_success() {
        let details = upstream.text().await.unwrap_or_default();
        tracing::warn!(status = %status, "Intickets feed returned an error");
        let status =
            StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        return Ok((
            status,
            Json(json!({
                "error": "Failed to fetch events from Intickets",
                "code": "UPSTREAM_ERROR",
                "details": details,
            })),
        )
            .into_response());
    }

    let data: Value = upstream.json().await.map_err(|err| {
        AppError::UpstreamFailed(format!("Intickets feed returned malformed JSON: {err}"))
    })?;

    Ok((
        [(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL))],
        Json(data),
    )
        .into_response())
}
