//! The JSON event document on disk.

use std::path::{Path, PathBuf};

use afisha_core::event::EventDocument;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::StoreError;

/// Handle to the persisted `{ "events": [...] }` document.
///
/// Reads return the raw JSON so that hand-edited documents with legacy
/// field shapes still serve; writes go through the typed
/// [`EventDocument`] and replace the file atomically (temp file +
/// rename). The write lock serializes concurrent admin saves.
pub struct EventStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl EventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the raw document. A missing file is an empty document, not
    /// an error; unparseable JSON is.
    pub async fn load_raw(&self) -> Result<Value, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Value::Object(
                    [("events".to_string(), Value::Array(Vec::new()))]
                        .into_iter()
                        .collect(),
                ));
            }
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Load the document through the typed record shape.
    pub async fn load(&self) -> Result<EventDocument, StoreError> {
        let raw = self.load_raw().await?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Replace the whole document.
    ///
    /// Serializes pretty-printed, writes to a sibling temp file, then
    /// renames over the target, so readers never observe a partial
    /// document.
    pub async fn save(&self, document: &EventDocument) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut bytes = serde_json::to_vec_pretty(document)?;
        bytes.push(b'\n');

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), events = document.events.len(), "Event document saved");
        Ok(())
    }
}
