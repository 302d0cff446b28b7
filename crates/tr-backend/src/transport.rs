use std::time::Duration;

use reqwest::{Client, Response};
use tr_core::{BackendError, Result, TrError};

pub(crate) fn http_client() -> Result<Client> {
    Client::builder()
        .build()
        .map_err(|e| TrError::Config(format!("cannot build HTTP client: {}", e)))
}

/// Sort transport failures into connectivity and everything else.
pub(crate) fn classify(err: reqwest::Error, timeout: Duration) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout { after_ms: timeout.as_millis() as u64 }
    } else if err.is_connect() || err.is_request() {
        BackendError::Unavailable(err.to_string())
    } else if err.is_decode() || err.is_body() {
        BackendError::Parse(err.to_string())
    } else if err.is_builder() {
        BackendError::Unsupported(err.to_string())
    } else {
        BackendError::Unavailable(err.to_string())
    }
}

/// Non-2xx responses become `BackendError::Http`; 2xx bodies are parsed as JSON.
pub(crate) async fn read_json(resp: Response, timeout: Duration) -> std::result::Result<serde_json::Value, BackendError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
        return Err(BackendError::Http { status: status.as_u16(), body });
    }
    resp.json::<serde_json::Value>().await.map_err(|e| {
        if e.is_timeout() {
            classify(e, timeout)
        } else {
            BackendError::Parse(e.to_string())
        }
    })
}
