//! Gemini `generateContent` backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use tr_core::config::GEMINI_API_KEY_ENV;
use tr_core::{Backend, BackendError, ModelTier, Result, TierConfig, TrError};

use crate::transport::{classify, http_client, read_json};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiBackend {
    tier: ModelTier,
    http: Client,
    url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl GeminiBackend {
    pub fn new(tier: ModelTier, config: &TierConfig) -> Result<Self> {
        let api_key = config.resolved_api_key().ok_or_else(|| {
            TrError::Config(format!("models.{}: gemini provider requires api_key or {}", tier, GEMINI_API_KEY_ENV))
        })?;
        let base = config
            .endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        Ok(Self {
            tier,
            http: http_client()?,
            url: format!("{}/v1beta/models/{}:generateContent", base, config.model),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens_for(tier),
            timeout: config.timeout(tier),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(json: &Value) -> std::result::Result<String, BackendError> {
    let parts = json["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| BackendError::Parse(format!("no candidates in response: {}", json)))?;
    Ok(parts.iter().filter_map(|p| p["text"].as_str()).collect::<String>())
}

#[async_trait]
impl Backend for GeminiBackend {
    fn tier(&self) -> ModelTier {
        self.tier
    }

    async fn generate(&self, prompt: &str, max_tokens: Option<u32>) -> std::result::Result<String, BackendError> {
        let body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ],
            "generationConfig": {
                "maxOutputTokens": max_tokens.unwrap_or(self.max_tokens),
            }
        });

        let start = Instant::now();
        let resp = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                let err = classify(e, self.timeout);
                warn!(tier = %self.tier, model = %self.model, error = %err, "gemini request failed");
                err
            })?;

        let json = read_json(resp, self.timeout).await?;
        let text = extract_text(&json)?;
        debug!(
            tier = %self.tier,
            model = %self.model,
            latency_ms = start.elapsed().as_millis() as u64,
            chars = text.len(),
            "gemini response"
        );
        Ok(text)
    }
}
