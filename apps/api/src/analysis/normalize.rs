//! Response normalization: turns raw model content into the mode's payload.

use serde::Serialize;
use thiserror::Error;

use crate::analysis::mode::Mode;
use crate::models::cv::RewrittenCV;
use crate::models::dossier::DossierPayload;

/// Normalized result of one analysis call.
///
/// Serializes as `{"roast": "..."}`, `{"dossie": {...}}` or `{"rewrite": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisOutcome {
    Roast(String),
    Dossie(DossierPayload),
    Rewrite(RewrittenCV),
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("{mode} output is not a valid payload: {source}")]
    Malformed {
        mode: Mode,
        #[source]
        source: serde_json::Error,
    },
}

pub fn normalize(raw: &str, mode: Mode) -> Result<AnalysisOutcome, NormalizeError> {
    match mode {
        Mode::Roast => Ok(AnalysisOutcome::Roast(raw.to_string())),
        Mode::Dossie => parse_json(raw, mode).map(AnalysisOutcome::Dossie),
        Mode::Rewrite => parse_json(raw, mode).map(AnalysisOutcome::Rewrite),
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(raw: &str, mode: Mode) -> Result<T, NormalizeError> {
    serde_json::from_str(strip_code_fence(raw))
        .map_err(|source| NormalizeError::Malformed { mode, source })
}

/// Strips one optional opening fence (with optional language tag) and one
/// optional closing fence from model output.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let body = match text.strip_prefix("```") {
        Some(rest) => {
            let tag_len = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
                .unwrap_or(rest.len());
            rest[tag_len..].trim_start()
        }
        None => text,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}
