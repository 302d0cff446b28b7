//! One backend per configured tier.

use std::sync::Arc;

use tr_core::{Backend, ModelTier, Provider, Result, RouterConfig, TierConfig};

use crate::{GeminiBackend, OllamaBackend};

/// Build the client for a tier from its provider settings.
pub fn build_backend(tier: ModelTier, config: &TierConfig) -> Result<Arc<dyn Backend>> {
    let backend: Arc<dyn Backend> = match config.provider {
        Provider::Ollama => Arc::new(OllamaBackend::new(tier, config)?),
        Provider::Gemini => Arc::new(GeminiBackend::new(tier, config)?),
    };
    Ok(backend)
}

/// Local and general are always present; fast-cloud is optional.
#[derive(Clone)]
pub struct Backends {
    local: Arc<dyn Backend>,
    general: Arc<dyn Backend>,
    fast_cloud: Option<Arc<dyn Backend>>,
}

impl Backends {
    pub fn new(
        local: Arc<dyn Backend>,
        general: Arc<dyn Backend>,
        fast_cloud: Option<Arc<dyn Backend>>,
    ) -> Self {
        Self { local, general, fast_cloud }
    }

    pub fn from_config(config: &RouterConfig) -> Result<Self> {
        let models = &config.models;
        let fast_cloud = match &models.fast_cloud {
            Some(tc) => Some(build_backend(ModelTier::FastCloud, tc)?),
            None => None,
        };
        Ok(Self::new(
            build_backend(ModelTier::Local, &models.local)?,
            build_backend(ModelTier::General, &models.general)?,
            fast_cloud,
        ))
    }

    pub fn get(&self, tier: ModelTier) -> Option<&Arc<dyn Backend>> {
        match tier {
            ModelTier::Local => Some(&self.local),
            ModelTier::General => Some(&self.general),
            ModelTier::FastCloud => self.fast_cloud.as_ref(),
        }
    }

    pub fn has(&self, tier: ModelTier) -> bool {
        self.get(tier).is_some()
    }

    /// Most capable tier available: fast-cloud when configured, else general.
    pub fn highest(&self) -> ModelTier {
        if self.fast_cloud.is_some() {
            ModelTier::FastCloud
        } else {
            ModelTier::General
        }
    }
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends")
            .field("local", &self.local.tier())
            .field("general", &self.general.tier())
            .field("fast_cloud", &self.fast_cloud.as_ref().map(|b| b.tier()))
            .finish()
    }
}
