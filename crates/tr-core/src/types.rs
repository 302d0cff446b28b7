use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrError;

/// Backend tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelTier {
    Local,
    General,
    #[serde(alias = "fast_cloud")]
    FastCloud,
}

impl ModelTier {
    pub const ALL: [ModelTier; 3] = [ModelTier::Local, ModelTier::General, ModelTier::FastCloud];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::General => "general",
            Self::FastCloud => "fast-cloud",
        }
    }

    /// (base seconds, tokens per second) used by the latency estimate.
    pub fn default_latency_profile(&self) -> (f64, f64) {
        match self {
            Self::Local => (0.5, 500.0),
            Self::General => (2.0, 100.0),
            Self::FastCloud => (1.0, 200.0),
        }
    }

    pub fn default_timeout_secs(&self) -> u64 {
        match self {
            Self::Local => 60,
            Self::General => 120,
            Self::FastCloud => 90,
        }
    }

    pub fn default_max_tokens(&self) -> u32 {
        match self {
            Self::Local => 2048,
            Self::General => 4096,
            Self::FastCloud => 8192,
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-selected optimization goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Cost,
    Speed,
    #[default]
    Balanced,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cost => "cost",
            Self::Speed => "speed",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cost" => Ok(Self::Cost),
            "speed" => Ok(Self::Speed),
            "balanced" => Ok(Self::Balanced),
            other => Err(TrError::InvalidRequest(format!(
                "unknown priority '{}' (expected cost, speed or balanced)",
                other
            ))),
        }
    }
}

/// Routing decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub model_type: ModelTier,
    pub confidence: f64,
    pub reason: String,
    pub estimated_cost: f64,
    pub estimated_latency: f64,
}

/// Result of `process`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutcome {
    pub response: String,
    pub model_used: ModelTier,
    pub decision: RoutingDecision,
    pub fallback_used: bool,
    pub fallback_reason: Option<String>,
}

impl GenerationOutcome {
    pub fn primary(response: String, decision: RoutingDecision) -> Self {
        Self {
            response,
            model_used: decision.model_type,
            decision,
            fallback_used: false,
            fallback_reason: None,
        }
    }

    pub fn fallback(response: String, model_used: ModelTier, decision: RoutingDecision, reason: String) -> Self {
        Self {
            response,
            model_used,
            decision,
            fallback_used: true,
            fallback_reason: Some(reason),
        }
    }
}

/// Result of `distill_and_process`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistillationOutcome {
    pub response: String,
    pub model_used: ModelTier,
    pub refined_prompt: String,
    pub original_prompt: String,
    pub distillation_used: bool,
    pub distillation_error: Option<String>,
}
