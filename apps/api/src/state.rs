use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatGateway;
use crate::session::PendingAnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Chat gateway. `LlmClient` in production, a scripted double in tests.
    pub gateway: Arc<dyn ChatGateway>,
    pub config: Config,
    pub pending: PendingAnalysisStore,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ChatGateway>, config: Config) -> Self {
        let pending = PendingAnalysisStore::new(config.pending_ttl_minutes);
        Self {
            gateway,
            config,
            pending,
        }
    }
}
