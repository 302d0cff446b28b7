use thiserror::Error;

use crate::types::ModelTier;

/// Failure reported by a single backend call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("request timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl BackendError {
    /// Unreachable or timed-out backends; these always move the cascade forward.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout { .. })
    }
}

/// One failed step of a cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct TierFailure {
    pub tier: ModelTier,
    pub error: String,
}

impl TierFailure {
    pub fn new(tier: ModelTier, error: impl Into<String>) -> Self {
        Self { tier, error: error.into() }
    }
}

fn join_failures(attempts: &[TierFailure]) -> String {
    attempts
        .iter()
        .map(|a| format!("{}: {}", a.tier, a.error))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum TrError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("{tier} backend failed: {source}")]
    Backend {
        tier: ModelTier,
        #[source]
        source: BackendError,
    },
    #[error("All tiers failed: {}", join_failures(.attempts))]
    Exhausted { attempts: Vec<TierFailure> },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TrError>;
