//! Public event document endpoint.

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/events
///
/// The persisted document, verbatim. Hand-edited files with legacy
/// field shapes serve as-is; a missing file serves an empty document.
pub async fn list_events(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let document = state.store.load_raw().await?;
    Ok(Json(document))
}
