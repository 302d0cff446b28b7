//! The capability every tier exposes to the orchestrator.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::types::ModelTier;

/// Stateless text generation for one tier.
#[async_trait]
pub trait Backend: Send + Sync {
    fn tier(&self) -> ModelTier;

    /// Generate a completion. `max_tokens` overrides the tier's configured limit.
    async fn generate(&self, prompt: &str, max_tokens: Option<u32>) -> Result<String, BackendError>;
}
