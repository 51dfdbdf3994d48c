//! Axum route handlers for the rewrite presentation endpoints.

use axum::{
    extract::rejection::JsonRejection,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::cv::RewrittenCV;
use crate::render::document::{assemble, Block};
use crate::render::pdf::{export_pdf, EXPORT_FILENAME};

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub blocks: Vec<Block>,
}

/// POST /api/v1/rewrite/document
pub async fn handle_document(
    body: Result<Json<RewrittenCV>, JsonRejection>,
) -> Result<Json<DocumentResponse>, AppError> {
    let Json(cv) = body?;
    Ok(Json(DocumentResponse {
        blocks: assemble(&cv),
    }))
}

/// POST /api/v1/rewrite/export
///
/// Lays the document out on a blocking worker and returns it as a download.
pub async fn handle_export(
    body: Result<Json<RewrittenCV>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(cv) = body?;
    let blocks = assemble(&cv);
    let bytes = tokio::task::spawn_blocking(move || export_pdf(&blocks))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("export task failed: {e}")))??;

    tracing::info!(
        bytes = bytes.len(),
        entries = cv.work_history.len(),
        "Exported rewritten CV"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
