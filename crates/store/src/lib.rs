//! File-backed persistence for the afisha.
//!
//! The event document lives in a single JSON file rewritten whole on
//! every admin save; uploaded images live in a flat directory next to
//! it. No database.

pub mod document;
pub mod uploads;

pub use document::EventStore;
pub use uploads::UploadStore;

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}
