//! Uploaded image storage.
//!
//! Images land in a flat directory under server-generated names, so a
//! client-supplied filename can never influence where a file is written.
//! Only the extension survives, reduced to lowercase ASCII alphanumerics.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::StoreError;

/// Upload size cap (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Longest extension kept from a client filename.
const MAX_EXTENSION_LEN: usize = 8;

/// A stored upload, as reported back to the admin panel.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub filename: String,
    pub size: usize,
}

/// Handle to the uploads directory.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the uploads directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Write an upload under a generated `{epoch-millis}-{hex}{.ext}`
    /// name, keeping at most the sanitized extension of
    /// `original_name`.
    pub async fn store(
        &self,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<StoredUpload, StoreError> {
        let filename = generate_filename(original_name);
        tokio::fs::write(self.dir.join(&filename), bytes).await?;

        tracing::debug!(filename = %filename, size = bytes.len(), "Upload stored");
        Ok(StoredUpload {
            filename,
            size: bytes.len(),
        })
    }
}

/// `{epoch-millis}-{random-hex}{.ext}`; collision-free enough for a
/// single-instance site.
fn generate_filename(original_name: Option<&str>) -> String {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let noise: u32 = rand::rng().random();

    match sanitize_extension(original_name) {
        Some(ext) => format!("{timestamp}-{noise:08x}.{ext}"),
        None => format!("{timestamp}-{noise:08x}"),
    }
}

/// Lowercased final extension with anything outside `[a-z0-9]` removed;
/// `None` when nothing usable remains. Path separators never survive.
fn sanitize_extension(original_name: Option<&str>) -> Option<String> {
    let name = original_name?;
    // Ignore any directory part a hostile client might send.
    let basename = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let (_, ext) = basename.rsplit_once('.')?;

    let cleaned: String = ext
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .take(MAX_EXTENSION_LEN)
        .collect();

    (!cleaned.is_empty()).then_some(cleaned)
}
