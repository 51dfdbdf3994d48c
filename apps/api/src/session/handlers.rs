//! Axum route handlers for the pending analysis slot.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::{resolve_view, AccessQuery, PaidView};
use crate::errors::AppError;
use crate::session::{PendingAnalysis, PENDING_ANALYSIS_KEY};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePendingBody {
    pub cv_text: String,
    pub roast_result: String,
}

#[derive(Debug, Serialize)]
pub struct PendingResponse {
    pub pending: Option<PendingAnalysis>,
    pub view: PaidView,
}

/// PUT /api/v1/sessions/:id/pending
pub async fn handle_save_pending(
    State(state): State<AppState>,
    session: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<SavePendingBody>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(session) = session?;
    let Json(body) = body?;
    if body.cv_text.trim().is_empty() || body.roast_result.trim().is_empty() {
        return Err(AppError::Validation(
            "cvText e roastResult são obrigatórios.".to_string(),
        ));
    }
    state
        .pending
        .save(session, body.cv_text, body.roast_result)
        .await;
    tracing::info!(%session, key = PENDING_ANALYSIS_KEY, "Saved pending analysis");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:id/pending?plan=
///
/// An absent or expired slot is not an error: `pending` is null.
pub async fn handle_restore_pending(
    State(state): State<AppState>,
    session: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<AccessQuery>, QueryRejection>,
) -> Result<Json<PendingResponse>, AppError> {
    let Path(session) = session?;
    let Query(query) = query?;
    let pending = state.pending.restore(session).await;
    let view = resolve_view(&query, state.config.qa_overrides);
    tracing::debug!(%session, found = pending.is_some(), ?view, "Restored pending analysis");
    Ok(Json(PendingResponse { pending, view }))
}

/// DELETE /api/v1/sessions/:id/pending
pub async fn handle_clear_pending(
    State(state): State<AppState>,
    session: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(session) = session?;
    let cleared = state.pending.clear(session).await;
    tracing::info!(%session, cleared, "Cleared pending analysis");
    Ok(StatusCode::NO_CONTENT)
}
