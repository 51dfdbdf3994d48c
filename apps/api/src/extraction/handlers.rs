//! Axum route handlers for PDF upload.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::extraction::extract_pdf_text;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub cv_text: String,
    pub chars: usize,
}

/// POST /api/v1/extract
///
/// Multipart upload with the PDF under the `file` part.
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut multipart = multipart?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(multipart_error)?;

        let cv_text = extract_pdf_text(
            bytes,
            content_type.as_deref(),
            state.config.max_upload_bytes,
        )
        .await?;
        let chars = cv_text.chars().count();
        return Ok(Json(ExtractResponse { cv_text, chars }));
    }

    Err(AppError::Validation(format!(
        "Campo '{FILE_FIELD}' ausente no upload."
    )))
}

// Hitting the router's body limit surfaces here as a multipart error.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}
