pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use afisha_store::uploads::MAX_UPLOAD_BYTES;

use crate::handlers;
use crate::state::AppState;

/// JSON body cap for the admin save endpoint (2 MiB).
const JSON_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Multipart overhead allowed on top of [`MAX_UPLOAD_BYTES`] before the
/// transport rejects the body outright.
const UPLOAD_BODY_SLACK: usize = 1024 * 1024;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /events                public: the persisted document, verbatim
/// /afisha                public: normalized feed + hero slides
///                        (?search=, ?sort=date_asc|date_desc, ?limit=)
/// /admin/events          replace the document (POST, bearer token)
/// /admin/upload          image upload (POST multipart, bearer token)
/// /intickets/events      proxy to the Intickets feed (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(handlers::events::list_events))
        .route("/afisha", get(handlers::afisha::afisha_feed))
        .route("/admin/events", post(handlers::admin_events::save_events))
        .route(
            "/admin/upload",
            post(handlers::upload::upload_image)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + UPLOAD_BODY_SLACK)),
        )
        .route("/intickets/events", get(handlers::intickets::proxy_events))
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
}
