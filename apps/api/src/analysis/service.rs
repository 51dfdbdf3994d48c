//! Analysis pipeline: dispatch → gateway → normalize → contract check.
//!
//! Exactly one gateway call per request. Every failure is terminal and goes
//! back to the caller; the client decides whether to let the user retry.

use tracing::{debug, info, warn};

use crate::analysis::contract::check_rewrite_contract;
use crate::analysis::dispatch::{dispatch, AnalysisRequest};
use crate::analysis::normalize::{normalize, AnalysisOutcome};
use crate::analysis::prompts::PROMPT_VERSION;
use crate::errors::AppError;
use crate::llm_client::ChatGateway;
use crate::models::dossier::DossierView;

/// Characters of model output included in parse-failure logs.
const LOG_PREVIEW_CHARS: usize = 500;

pub async fn run_analysis(
    gateway: &dyn ChatGateway,
    request: &AnalysisRequest,
) -> Result<AnalysisOutcome, AppError> {
    let mode = request.mode();
    info!(
        mode = %mode,
        chars = request.cv_text().chars().count(),
        prompt_version = PROMPT_VERSION,
        json = mode.expects_json(),
        "Processing CV"
    );
    debug!(
        preview = %preview(request.cv_text(), 200),
        "Received CV text"
    );

    let prompt = dispatch(request.cv_text(), mode);
    let raw = gateway.invoke(prompt.system, &prompt.user).await?;

    let outcome = normalize(&raw, mode).map_err(|e| {
        warn!(
            mode = %mode,
            content = %preview(&raw, LOG_PREVIEW_CHARS),
            "Failed to parse model output"
        );
        AppError::from(e)
    })?;

    match &outcome {
        AnalysisOutcome::Roast(text) => {
            info!(chars = text.chars().count(), "Generated roast");
        }
        AnalysisOutcome::Dossie(payload) => match payload.view() {
            DossierView::Clean => info!("Parsed dossie with no findings"),
            DossierView::Findings(items) => info!(errors = items.len(), "Parsed dossie"),
        },
        AnalysisOutcome::Rewrite(cv) => {
            let report = check_rewrite_contract(request.cv_text(), cv);
            info!(
                entries = report.entries,
                anchors = report.anchors,
                current = report.current,
                "Parsed rewrite"
            );
            if report.missing_entries() > 0 {
                debug!(
                    anchors = report.anchors,
                    entries = report.entries,
                    "Fewer work entries than date anchors in source"
                );
            }
            if report.noncanonical_current > 0 {
                warn!(
                    count = report.noncanonical_current,
                    "Ongoing work entries without the canonical period label"
                );
            }
            if !report.ordering_ok() {
                warn!(
                    current_first = report.current_first,
                    chronological = report.chronological,
                    "Rewrite work history violates ordering contract; rendering as received"
                );
            }
        }
    }

    Ok(outcome)
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
