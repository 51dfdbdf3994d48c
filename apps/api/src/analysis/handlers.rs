//! Axum route handlers for the analysis proxy endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::analysis::dispatch::AnalysisRequest;
use crate::analysis::mode::Mode;
use crate::analysis::normalize::AnalysisOutcome;
use crate::analysis::service::run_analysis;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeBody {
    #[serde(default)]
    pub cv_text: Option<String>,
    #[serde(default)]
    pub mode: Option<Mode>,
}

/// POST /api/v1/roast-cv
///
/// Body `{cvText, mode?}`. Returns `{roast}`, `{dossie}` or `{rewrite}`.
/// Blank text is rejected before the gateway is called.
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeBody>, JsonRejection>,
) -> Result<Json<AnalysisOutcome>, AppError> {
    let Json(body) = body?;
    let request = AnalysisRequest::new(body.cv_text, body.mode)?;
    let outcome = run_analysis(state.gateway.as_ref(), &request).await?;
    Ok(Json(outcome))
}
