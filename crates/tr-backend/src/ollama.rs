//! Ollama chat backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use tr_core::{Backend, BackendError, ModelTier, Result, TierConfig, TrError};

use crate::transport::{classify, http_client, read_json};

pub struct OllamaBackend {
    tier: ModelTier,
    http: Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl OllamaBackend {
    pub fn new(tier: ModelTier, config: &TierConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| TrError::Config(format!("models.{}: ollama provider requires an endpoint", tier)))?;
        Ok(Self {
            tier,
            http: http_client()?,
            endpoint,
            model: config.model.clone(),
            max_tokens: config.max_tokens_for(tier),
            timeout: config.timeout(tier),
        })
    }
}

#[async_trait]
impl Backend for OllamaBackend {
    fn tier(&self) -> ModelTier {
        self.tier
    }

    async fn generate(&self, prompt: &str, max_tokens: Option<u32>) -> std::result::Result<String, BackendError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "stream": false,
            "options": {
                "num_predict": max_tokens.unwrap_or(self.max_tokens),
            }
        });

        let start = Instant::now();
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                let err = classify(e, self.timeout);
                warn!(tier = %self.tier, model = %self.model, error = %err, "ollama request failed");
                err
            })?;

        let json = read_json(resp, self.timeout).await?;
        let text = json["message"]["content"].as_str().unwrap_or("").to_string();
        debug!(
            tier = %self.tier,
            model = %self.model,
            latency_ms = start.elapsed().as_millis() as u64,
            chars = text.len(),
            "ollama response"
        );
        Ok(text)
    }
}
