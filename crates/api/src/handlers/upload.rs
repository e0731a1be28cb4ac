//! Admin image upload.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use afisha_store::uploads::MAX_UPLOAD_BYTES;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;

/// Response for a stored upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Public path the image is served under.
    pub url: String,
    pub filename: String,
    pub size: usize,
}

/// POST /api/admin/upload
///
/// Multipart upload with a single `image` field. The part must carry an
/// `image/*` content type and fit in [`MAX_UPLOAD_BYTES`]; the stored
/// name is server-generated, so the client filename only contributes a
/// sanitized extension.
pub async fn upload_image(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            return Err(AppError::BadRequest(
                "Only image uploads are accepted".into(),
            ));
        }

        let original_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::PayloadTooLarge(format!(
                "Image exceeds the {} MiB upload limit",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        let stored = state.uploads.store(original_name.as_deref(), &data).await?;

        tracing::info!(
            filename = %stored.filename,
            size = stored.size,
            "Image uploaded"
        );

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                url: format!("/uploads/{}", stored.filename),
                filename: stored.filename,
                size: stored.size,
            }),
        ));
    }

    Err(AppError::BadRequest("No file received".into()))
}
