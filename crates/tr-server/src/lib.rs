//! Tier router HTTP API server (Axum).
//!
//! Exposes query dispatch, routing-only decisions, prompt distillation and
//! health endpoints over a shared [`tr_orchestrator::Orchestrator`].

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;
use tr_core::{Result, RouterConfig};

/// Build the application router from a configuration.
pub fn app(config: RouterConfig) -> Result<Router> {
    Ok(app_with_state(AppState::from_config(config)?))
}

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::query_routes())
        .with_state(state)
}
