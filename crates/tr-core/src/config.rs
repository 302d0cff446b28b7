//! Process-wide configuration, loaded once from TOML and read-only afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, TrError};
use crate::types::ModelTier;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub models: ModelsConfig,
    pub routing: RoutingParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Ollama,
    Gemini,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    pub local: TierConfig,
    pub general: TierConfig,
    #[serde(default, alias = "gemini")]
    pub fast_cloud: Option<TierConfig>,
}

impl ModelsConfig {
    pub fn get(&self, tier: ModelTier) -> Option<&TierConfig> {
        match tier {
            ModelTier::Local => Some(&self.local),
            ModelTier::General => Some(&self.general),
            ModelTier::FastCloud => self.fast_cloud.as_ref(),
        }
    }

    pub fn has_fast_cloud(&self) -> bool {
        self.fast_cloud.is_some()
    }

    /// Configured tiers, cheapest first.
    pub fn configured(&self) -> Vec<ModelTier> {
        ModelTier::ALL.into_iter().filter(|t| self.get(*t).is_some()).collect()
    }
}

/// Per-tier backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierConfig {
    pub provider: Provider,
    pub model: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    pub cost_per_token: f64,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub base_latency: Option<f64>,
    #[serde(default)]
    pub latency_divisor: Option<f64>,
    /// Tiers tried, in order, when this one fails. `None` uses the tier default.
    #[serde(default)]
    pub fallback: Option<Vec<ModelTier>>,
}

impl TierConfig {
    pub fn ollama(model: &str, endpoint: &str, cost_per_token: f64) -> Self {
        Self {
            provider: Provider::Ollama,
            model: model.into(),
            endpoint: Some(endpoint.into()),
            api_key: None,
            cost_per_token,
            max_tokens: None,
            timeout_secs: None,
            base_latency: None,
            latency_divisor: None,
            fallback: None,
        }
    }

    pub fn gemini(model: &str, api_key: Option<&str>, cost_per_token: f64) -> Self {
        Self {
            provider: Provider::Gemini,
            model: model.into(),
            endpoint: None,
            api_key: api_key.map(String::from),
            cost_per_token,
            max_tokens: None,
            timeout_secs: None,
            base_latency: None,
            latency_divisor: None,
            fallback: None,
        }
    }

    pub fn latency_profile(&self, tier: ModelTier) -> (f64, f64) {
        let (base, divisor) = tier.default_latency_profile();
        (self.base_latency.unwrap_or(base), self.latency_divisor.unwrap_or(divisor))
    }

    pub fn timeout(&self, tier: ModelTier) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or_else(|| tier.default_timeout_secs()))
    }

    pub fn max_tokens_for(&self, tier: ModelTier) -> u32 {
        self.max_tokens.unwrap_or_else(|| tier.default_max_tokens())
    }

    pub fn fallback_for(&self, tier: ModelTier) -> Vec<ModelTier> {
        match &self.fallback {
            Some(list) => list.clone(),
            None if tier == ModelTier::Local => vec![ModelTier::General],
            None => Vec::new(),
        }
    }

    /// Explicit key first, then the `GEMINI_API_KEY` environment variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(GEMINI_API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()))
    }
}

fn default_large_input_threshold() -> f64 {
    2000.0
}

fn default_fast_cloud_preferred_threshold() -> f64 {
    1000.0
}

fn default_true() -> bool {
    true
}

/// Thresholds and weights used by the routing engine.
///
/// The three weights are relative; nothing requires them to sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingParams {
    pub complexity_threshold: f64,
    pub max_slm_tokens: usize,
    #[serde(default = "default_large_input_threshold")]
    pub large_input_threshold: f64,
    #[serde(default = "default_fast_cloud_preferred_threshold", alias = "gemini_preferred_threshold")]
    pub fast_cloud_preferred_threshold: f64,
    #[serde(default = "default_true")]
    pub fallback_enabled: bool,
    pub cost_weight: f64,
    pub latency_weight: f64,
    pub quality_weight: f64,
}

impl Default for RoutingParams {
    fn default() -> Self {
        Self {
            complexity_threshold: 0.4,
            max_slm_tokens: 500,
            large_input_threshold: default_large_input_threshold(),
            fast_cloud_preferred_threshold: default_fast_cloud_preferred_threshold(),
            fallback_enabled: true,
            cost_weight: 0.4,
            latency_weight: 0.3,
            quality_weight: 0.3,
        }
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            models: ModelsConfig {
                local: TierConfig::ollama("llama3.2", "http://localhost:11434/api/chat", 0.0),
                general: TierConfig::ollama("llama3", "http://localhost:11434/api/chat", 0.00001),
                fast_cloud: None,
            },
            routing: RoutingParams::default(),
        }
    }
}

impl RouterConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| TrError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TrError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config = Self::from_toml(&content)?;
        tracing::info!(
            path = %path.display(),
            fast_cloud = config.models.has_fast_cloud(),
            "loaded routing configuration"
        );
        Ok(config)
    }

    /// Tier settings, or a configuration error when the tier is absent.
    pub fn tier(&self, tier: ModelTier) -> Result<&TierConfig> {
        self.models
            .get(tier)
            .ok_or_else(|| TrError::Config(format!("no configuration for tier {}", tier)))
    }

    pub fn validate(&self) -> Result<()> {
        let r = &self.routing;
        for (name, value) in [
            ("cost_weight", r.cost_weight),
            ("latency_weight", r.latency_weight),
            ("quality_weight", r.quality_weight),
            ("large_input_threshold", r.large_input_threshold),
            ("fast_cloud_preferred_threshold", r.fast_cloud_preferred_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TrError::Config(format!("routing.{} must be a non-negative number, got {}", name, value)));
            }
        }
        if !(0.0..=1.0).contains(&r.complexity_threshold) {
            return Err(TrError::Config(format!(
                "routing.complexity_threshold must be within [0, 1], got {}",
                r.complexity_threshold
            )));
        }

        for tier in self.models.configured() {
            let Some(tc) = self.models.get(tier) else { continue };
            self.validate_tier(tier, tc)?;
        }
        Ok(())
    }

    fn validate_tier(&self, tier: ModelTier, tc: &TierConfig) -> Result<()> {
        let err = |msg: String| Err(TrError::Config(format!("models.{}: {}", tier, msg)));

        if tc.model.trim().is_empty() {
            return err("model must not be empty".into());
        }
        if !tc.cost_per_token.is_finite() || tc.cost_per_token < 0.0 {
            return err(format!("cost_per_token must be non-negative, got {}", tc.cost_per_token));
        }
        if let Some(d) = tc.latency_divisor {
            if !(d.is_finite() && d > 0.0) {
                return err(format!("latency_divisor must be positive, got {}", d));
            }
        }
        if let Some(b) = tc.base_latency {
            if !(b.is_finite() && b >= 0.0) {
                return err(format!("base_latency must be non-negative, got {}", b));
            }
        }
        if tc.timeout_secs == Some(0) {
            return err("timeout_secs must be positive".into());
        }
        if tc.max_tokens == Some(0) {
            return err("max_tokens must be positive".into());
        }
        match tc.provider {
            Provider::Ollama => {
                if tc.endpoint.as_deref().map(str::trim).unwrap_or("").is_empty() {
                    return err("ollama provider requires an endpoint".into());
                }
            }
            Provider::Gemini => {
                if tc.resolved_api_key().is_none() {
                    return err(format!("gemini provider requires api_key or {}", GEMINI_API_KEY_ENV));
                }
            }
        }
        for next in tc.fallback_for(tier) {
            if next == tier {
                return err("fallback must not name the tier itself".into());
            }
            if self.models.get(next).is_none() {
                return err(format!("fallback tier {} is not configured", next));
            }
        }
        Ok(())
    }
}
