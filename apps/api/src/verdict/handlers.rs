//! Axum route handlers for the free-tier verdict card.

use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::verdict::summary::{extract_summary, ScoreBand, VerdictSummary};

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub roast: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: VerdictSummary,
    pub band: ScoreBand,
}

/// POST /api/v1/verdict/summary
///
/// Extracts score, first impression and one critical error from a roast.
/// Always succeeds for a well-formed body; missing markers fall back.
pub async fn handle_summary(
    request: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, AppError> {
    let Json(request) = request?;
    let summary = extract_summary(&request.roast);
    let band = summary.band();
    Ok(Json(SummaryResponse { summary, band }))
}
