use std::sync::Arc;

use crate::advisory::ResumeAdvisor;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable advisory backend. Default: QwenAdvisor.
    pub advisor: Arc<dyn ResumeAdvisor>,
}
