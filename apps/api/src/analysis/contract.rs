//! Rewrite contract check: verifies the model honoured the Date Anchor rules.
//!
//! The rewrite template tells the model to emit one work entry per date
//! anchor, current entry first, the rest in strictly decreasing order. That
//! contract lives only in the instruction text, so this module measures the
//! returned `workHistory` against it. The report is logged; the array is
//! never re-sorted and the response is never altered.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::analysis::prompts::CURRENT_PERIOD_LABEL;
use crate::models::cv::{RewrittenCV, WorkExperience};

static DATE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)\b(?:
            (?P<mon>jan(?:eiro|uary)?|fev(?:ereiro)?|feb(?:ruary)?|mar(?:ço|co|ch)?|abr(?:il)?|apr(?:il)?
               |mai(?:o)?|may|jun(?:ho|e)?|jul(?:ho|y)?|ago(?:sto)?|aug(?:ust)?|set(?:embro)?
               |sep(?:t|tember)?|out(?:ubro)?|oct(?:ober)?|nov(?:embro|ember)?|dez(?:embro)?|dec(?:ember)?)
              \.?\s*(?:de\s+|/\s*)?(?P<y1>(?:19|20)\d{2})
          | (?P<mm>0?[1-9]|1[0-2])\s*/\s*(?P<y2>(?:19|20)\d{2})
          | (?P<y3>(?:19|20)\d{2})
          | (?P<cur>atualmente|atual|presente|present|current)
        )\b",
    )
    .expect("date token pattern is valid")
});

/// Sort key of an employment period. `Current` outranks every dated key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PeriodKey {
    Dated { year: u16, month: u8 },
    Current,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewriteContractReport {
    /// Distinct date tokens found in the source text.
    pub anchors: usize,
    /// Work entries returned by the model.
    pub entries: usize,
    /// Ongoing entries.
    pub current: usize,
    /// Ongoing entries not using the canonical `Atualmente` label.
    pub noncanonical_current: usize,
    /// No dated entry precedes an ongoing one.
    pub current_first: bool,
    /// Dated entries are strictly decreasing.
    pub chronological: bool,
}

impl RewriteContractReport {
    pub fn ordering_ok(&self) -> bool {
        self.current_first && self.chronological
    }

    /// Date anchors with no matching work entry. Anchors also count education
    /// and certification years, so this is an upper bound.
    pub fn missing_entries(&self) -> usize {
        self.anchors.saturating_sub(self.entries)
    }
}

/// Distinct date-like tokens in `text`, in order of first appearance, lowercased.
pub fn find_date_anchors(text: &str) -> Vec<String> {
    let mut anchors: Vec<String> = Vec::new();
    for m in DATE_TOKEN.find_iter(text) {
        let token = m
            .as_str()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if !anchors.contains(&token) {
            anchors.push(token);
        }
    }
    anchors
}

pub fn is_current_period(period: &str) -> bool {
    DATE_TOKEN
        .captures_iter(period)
        .any(|c| c.name("cur").is_some())
}

/// Latest point mentioned in `period`, or `None` when it carries no date.
pub fn period_key(period: &str) -> Option<PeriodKey> {
    DATE_TOKEN.captures_iter(period).map(|c| token_key(&c)).max()
}

fn token_key(caps: &Captures<'_>) -> PeriodKey {
    if caps.name("cur").is_some() {
        return PeriodKey::Current;
    }
    let year = ["y1", "y2", "y3"]
        .iter()
        .find_map(|g| caps.name(g))
        .and_then(|m| m.as_str().parse::<u16>().ok())
        .unwrap_or(0);
    let month = if let Some(name) = caps.name("mon") {
        month_number(name.as_str())
    } else {
        caps.name("mm")
            .and_then(|m| m.as_str().parse::<u8>().ok())
            .unwrap_or(0)
    };
    PeriodKey::Dated { year, month }
}

fn month_number(name: &str) -> u8 {
    let prefix: String = name.to_lowercase().chars().take(3).collect();
    match prefix.as_str() {
        "jan" => 1,
        "fev" | "feb" => 2,
        "mar" => 3,
        "abr" | "apr" => 4,
        "mai" | "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "ago" | "aug" => 8,
        "set" | "sep" => 9,
        "out" | "oct" => 10,
        "nov" => 11,
        "dez" | "dec" => 12,
        _ => 0,
    }
}

pub fn check_work_order(history: &[WorkExperience]) -> (bool, bool) {
    let keys: Vec<Option<PeriodKey>> = history.iter().map(|w| period_key(&w.period)).collect();

    let first_dated = keys
        .iter()
        .position(|k| matches!(k, Some(PeriodKey::Dated { .. })));
    let current_first = match first_dated {
        Some(idx) => !keys[idx..]
            .iter()
            .any(|k| matches!(k, Some(PeriodKey::Current))),
        None => true,
    };

    let dated: Vec<PeriodKey> = keys
        .iter()
        .flatten()
        .copied()
        .filter(|k| *k != PeriodKey::Current)
        .collect();
    let chronological = dated.windows(2).all(|w| w[0] > w[1]);

    (current_first, chronological)
}

pub fn check_rewrite_contract(source_text: &str, cv: &RewrittenCV) -> RewriteContractReport {
    let (current_first, chronological) = check_work_order(&cv.work_history);
    let current: Vec<&WorkExperience> = cv
        .work_history
        .iter()
        .filter(|w| is_current_period(&w.period))
        .collect();
    RewriteContractReport {
        anchors: find_date_anchors(source_text).len(),
        entries: cv.work_history.len(),
        current: current.len(),
        noncanonical_current: current
            .iter()
            .filter(|w| !w.period.contains(CURRENT_PERIOD_LABEL))
            .count(),
        current_first,
        chronological,
    }
}
