//! Mode dispatch: request validation and prompt composition.

use crate::analysis::mode::Mode;
use crate::errors::AppError;

/// Message returned when the extracted text is missing or blank.
pub const EMPTY_TEXT_MESSAGE: &str =
    "CV text is required. O texto do PDF não foi extraído corretamente.";

/// A validated analysis request. Holding one proves the text is non-blank.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    cv_text: String,
    mode: Mode,
}

impl AnalysisRequest {
    /// Rejects absent or whitespace-only text. `mode` defaults to `roast`.
    pub fn new(cv_text: Option<String>, mode: Option<Mode>) -> Result<Self, AppError> {
        let cv_text = cv_text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::Validation(EMPTY_TEXT_MESSAGE.to_string()))?;
        Ok(Self {
            cv_text,
            mode: mode.unwrap_or_default(),
        })
    }

    pub fn cv_text(&self) -> &str {
        &self.cv_text
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

/// System + user prompt pair for one gateway call.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: &'static str,
    pub user: String,
}

/// Selects the mode's template and wraps the text in its task framing.
/// Pure; callers validate through `AnalysisRequest` first.
pub fn dispatch(cv_text: &str, mode: Mode) -> Prompt {
    Prompt {
        system: mode.system_prompt(),
        user: format!("{}\n\n{}", mode.task_framing(), cv_text),
    }
}
