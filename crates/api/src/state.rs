use std::sync::Arc;

use afisha_store::{EventStore, UploadStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// The persisted event document.
    pub store: Arc<EventStore>,
    /// Uploaded image storage.
    pub uploads: Arc<UploadStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Shared HTTP client for the Intickets proxy (connection pooling).
    pub http: reqwest::Client,
}
