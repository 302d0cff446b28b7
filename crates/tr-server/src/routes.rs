use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use tr_core::{ModelTier, Priority};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub prompt: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default = "default_true")]
    pub use_llm_fallback: bool,
}

#[derive(Debug, Deserialize)]
pub struct DistillRequest {
    pub prompt: String,
}

fn default_true() -> bool {
    true
}

fn parse_priority(raw: Option<&str>) -> Result<Priority, ApiError> {
    match raw {
        None => Ok(Priority::default()),
        Some(p) => Ok(p.parse::<Priority>()?),
    }
}

fn require_prompt(prompt: &str) -> Result<(), ApiError> {
    if prompt.trim().is_empty() {
        return Err(ApiError::bad_request("prompt must not be empty"));
    }
    Ok(())
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

pub fn query_routes() -> Router<AppState> {
    Router::new()
        .route("/query", post(query))
        .route("/route", post(route_only))
        .route("/distill", post(distill))
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "Tier router API",
        "endpoints": {
            "/query": "POST - Process a query with tier routing and fallback",
            "/route": "POST - Routing decision without dispatch",
            "/distill": "POST - Refine the prompt locally, answer on the highest tier",
            "/health": "GET - Health check",
        }
    }))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let backends = state.orchestrator.backends();
    let tiers: Vec<&str> = ModelTier::ALL
        .iter()
        .filter(|t| backends.has(**t))
        .map(|t| t.as_str())
        .collect();
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "tiers": tiers,
    }))
}

async fn query(State(state): State<AppState>, Json(req): Json<QueryRequest>) -> Result<Json<Value>, ApiError> {
    require_prompt(&req.prompt)?;
    let priority = parse_priority(req.priority.as_deref())?;
    let request_id = Uuid::new_v4();
    let span = info_span!("query", %request_id, %priority);

    let outcome = state
        .orchestrator
        .process(&req.prompt, priority, req.use_llm_fallback)
        .instrument(span)
        .await?;
    info!(%request_id, model_used = %outcome.model_used, fallback_used = outcome.fallback_used, "query served");

    let mut body = serde_json::to_value(&outcome).map_err(|e| ApiError::internal(e.to_string()))?;
    body["request_id"] = json!(request_id);
    Ok(Json(body))
}

async fn route_only(State(state): State<AppState>, Json(req): Json<QueryRequest>) -> Result<Json<Value>, ApiError> {
    require_prompt(&req.prompt)?;
    let priority = parse_priority(req.priority.as_deref())?;
    let decision = state.orchestrator.route(&req.prompt, priority);
    Ok(Json(json!({ "decision": decision })))
}

async fn distill(State(state): State<AppState>, Json(req): Json<DistillRequest>) -> Result<Json<Value>, ApiError> {
    require_prompt(&req.prompt)?;
    let request_id = Uuid::new_v4();
    let span = info_span!("distill", %request_id);

    let outcome = state
        .orchestrator
        .distill_and_process(&req.prompt)
        .instrument(span)
        .await?;

    let mut body = serde_json::to_value(&outcome).map_err(|e| ApiError::internal(e.to_string()))?;
    body["request_id"] = json!(request_id);
    Ok(Json(body))
}
