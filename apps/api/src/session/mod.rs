//! Pending analysis store.
//!
//! Holds the free roast of a session across the payment redirect so the paid
//! view can be restored without re-uploading. One slot per session id; the
//! client documents the slot under `PENDING_ANALYSIS_KEY`. Memory only.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const PENDING_ANALYSIS_KEY: &str = "pending_roast";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAnalysis {
    pub cv_text: String,
    pub roast_result: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct PendingAnalysisStore {
    slots: Arc<RwLock<HashMap<Uuid, PendingAnalysis>>>,
    ttl: Duration,
}

impl PendingAnalysisStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Last write wins.
    pub async fn save(&self, session: Uuid, cv_text: String, roast_result: String) -> PendingAnalysis {
        self.save_at(session, cv_text, roast_result, Utc::now()).await
    }

    pub async fn save_at(
        &self,
        session: Uuid,
        cv_text: String,
        roast_result: String,
        now: DateTime<Utc>,
    ) -> PendingAnalysis {
        let pending = PendingAnalysis {
            cv_text,
            roast_result,
            saved_at: now,
        };
        self.slots.write().await.insert(session, pending.clone());
        pending
    }

    pub async fn restore(&self, session: Uuid) -> Option<PendingAnalysis> {
        self.restore_at(session, Utc::now()).await
    }

    /// Returns the slot unless it is older than the TTL, in which case it is evicted.
    pub async fn restore_at(&self, session: Uuid, now: DateTime<Utc>) -> Option<PendingAnalysis> {
        {
            let slots = self.slots.read().await;
            match slots.get(&session) {
                None => return None,
                Some(p) if now - p.saved_at <= self.ttl => return Some(p.clone()),
                Some(_) => {}
            }
        }

        let mut slots = self.slots.write().await;
        // re-check under the write lock; a save may have refreshed the slot
        match slots.get(&session) {
            Some(p) if now - p.saved_at <= self.ttl => Some(p.clone()),
            Some(_) => {
                slots.remove(&session);
                tracing::debug!(%session, "Evicted expired pending analysis");
                None
            }
            None => None,
        }
    }

    /// Returns whether a slot was present.
    pub async fn clear(&self, session: Uuid) -> bool {
        self.slots.write().await.remove(&session).is_some()
    }
}
