use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::uploads::validation::{object_key, validate_image};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Images must be 5MB or smaller".to_string())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}

/// POST /api/v1/uploads
///
/// Expects a single multipart field named `file`.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let body = field.bytes().await.map_err(multipart_error)?;

        validate_image(content_type.as_deref(), body.len())?;

        let key = object_key(file_name.as_deref(), Utc::now());
        let size = body.len();
        let url = state
            .images
            .put_image(&key, body, content_type.as_deref().unwrap_or_default())
            .await?;
        info!(key = %key, size, "Profile image uploaded");

        return Ok(Json(UploadResponse { url }));
    }

    Err(AppError::Validation("No file was selected".to_string()))
}
