//! Paid-view overrides for development and QA.
//!
//! `?plan=` / `?PLAN=` / `?qa=` / `?QA=` with `dossie` or `premium` force the
//! matching view. They are honoured only when `QA_OVERRIDES` is enabled and
//! never stand in for a real entitlement.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaidView {
    #[default]
    None,
    Dossie,
    Premium,
}

impl PaidView {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "dossie" => Some(PaidView::Dossie),
            "premium" => Some(PaidView::Premium),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AccessQuery {
    pub plan: Option<String>,
    #[serde(rename = "PLAN")]
    pub plan_upper: Option<String>,
    pub qa: Option<String>,
    #[serde(rename = "QA")]
    pub qa_upper: Option<String>,
}

impl AccessQuery {
    /// First recognised override, `plan` before `qa`, lowercase before uppercase.
    pub fn requested(&self) -> Option<PaidView> {
        [&self.plan, &self.plan_upper, &self.qa, &self.qa_upper]
            .into_iter()
            .flatten()
            .find_map(|raw| PaidView::parse(raw))
    }
}

pub fn resolve_view(query: &AccessQuery, overrides_enabled: bool) -> PaidView {
    match query.requested() {
        Some(view) if overrides_enabled => {
            tracing::warn!(?view, "QA override honoured; paid view forced without entitlement");
            view
        }
        Some(view) => {
            tracing::debug!(?view, "QA override ignored; overrides are disabled");
            PaidView::None
        }
        None => PaidView::None,
    }
}
