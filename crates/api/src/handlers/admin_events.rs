//! Admin endpoint replacing the whole event document.

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use afisha_core::event::{sanitize_events, EventDocument, EventDraft};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;

/// POST /api/admin/events
///
/// Replaces the document with the submitted array: each draft is
/// coerced field by field, ids are slugged and made unique, and the
/// result is persisted atomically. Returns the saved document.
///
/// Accepts both body shapes the admin panels have used:
/// `{ "events": [...] }` and a bare array.
pub async fn save_events(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<EventDocument>> {
    let drafts = parse_drafts(&body).ok_or_else(|| {
        AppError::BadRequest("The events field is required and must be an array".into())
    })?;

    let document = EventDocument {
        events: sanitize_events(&drafts),
    };
    state.store.save(&document).await?;

    tracing::info!(events = document.events.len(), "Event document replaced");
    Ok(Json(document))
}

/// Unwrap the submitted array. Entries that are not objects degrade to
/// empty drafts (and end up as positional `event-{n}` records) rather
/// than failing the save.
fn parse_drafts(body: &Value) -> Option<Vec<EventDraft>> {
    let list = match body {
        Value::Array(list) => list,
        _ => body.get("events")?.as_array()?,
    };

    Some(
        list.iter()
            .map(|entry| serde_json::from_value(entry.clone()).unwrap_or_default())
            .collect(),
    )
}
