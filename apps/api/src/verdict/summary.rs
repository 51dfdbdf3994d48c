//! Free-tier summary: best-effort extraction from the free-text roast.
//!
//! The roast format is enforced only by instruction text, so every field has
//! a fallback and `extract_summary` always returns something displayable.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SCORE: f32 = 5.0;
pub const FALLBACK_FIRST_IMPRESSION: &str = "Seu CV tem potencial, mas precisa de ajustes...";
pub const FALLBACK_CRITICAL_ERROR: &str =
    "Falta de métricas e resultados concretos nas experiências.";

static SCORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Nota:\s*(\d+(?:[.,]\d+)?)\s*/\s*10").expect("score pattern is valid")
});

static FIRST_IMPRESSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)📢\s*A PRIMEIRA IMPRESSÃO\s*\n([^\n✅😬📊]+)")
        .expect("first impression pattern is valid")
});

static REALITY_CHECK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)😬\s*O CHOQUE DE REALIDADE\s*\n(.*?)(?:📊|\z)")
        .expect("reality check pattern is valid")
});

static BULLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(?:•|^[ \t]*[-*])[ \t]*([^\n•]+)").expect("bullet pattern is valid")
});

/// Display fields for the free result card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictSummary {
    /// In `[0, 10]`.
    pub score: f32,
    pub first_impression: String,
    pub critical_error: String,
}

/// Colour band of the score card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl VerdictSummary {
    pub fn band(&self) -> ScoreBand {
        if self.score >= 7.0 {
            ScoreBand::Good
        } else if self.score >= 5.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

pub fn extract_summary(roast: &str) -> VerdictSummary {
    VerdictSummary {
        score: extract_score(roast),
        first_impression: extract_first_impression(roast),
        critical_error: extract_critical_error(roast),
    }
}

fn extract_score(roast: &str) -> f32 {
    SCORE
        .captures(roast)
        .and_then(|c| c[1].replace(',', ".").parse::<f32>().ok())
        .map(|s| s.clamp(0.0, 10.0))
        .unwrap_or(DEFAULT_SCORE)
}

fn extract_first_impression(roast: &str) -> String {
    FIRST_IMPRESSION
        .captures(roast)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_FIRST_IMPRESSION.to_string())
}

fn extract_critical_error(roast: &str) -> String {
    REALITY_CHECK
        .captures(roast)
        .and_then(|section| {
            BULLET
                .captures_iter(&section[1])
                .map(|b| b[1].trim().to_string())
                .find(|s| !s.is_empty())
        })
        .unwrap_or_else(|| FALLBACK_CRITICAL_ERROR.to_string())
}
