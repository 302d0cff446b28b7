//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use tr_core::{Result, RouterConfig};
use tr_orchestrator::Orchestrator;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            start_time: Instant::now(),
        }
    }

    pub fn from_config(config: RouterConfig) -> Result<Self> {
        Ok(Self::new(Orchestrator::from_config(config)?))
    }
}
