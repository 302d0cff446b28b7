use std::path::PathBuf;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tr_core::RouterConfig;
use tr_server::{app_with_state, state::AppState};

const CONFIG_ENV: &str = "TIERROUTE_CONFIG";
const LOG_JSON_ENV: &str = "TIERROUTE_LOG_JSON";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var_os(LOG_JSON_ENV).is_some() {
        tracing_subscriber::fmt().json().with_env_filter(filter).with_current_span(true).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// First CLI argument, then `TIERROUTE_CONFIG`, then `config.toml`.
fn config_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(CONFIG_ENV))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let path = config_path();
    let config = RouterConfig::from_file(&path)
        .with_context(|| format!("loading configuration from {}", path.display()))?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::from_config(config).context("building backends")?;
    let app = app_with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "tier router listening");
    axum::serve(listener, app).await?;

    Ok(())
}
