//! Ordered candidate tiers for one request.

use tr_backend::Backends;
use tr_core::{ModelTier, RouterConfig};

/// Primary tier first, then each tier's configured fallbacks in order.
/// A tier appears at most once; tiers without a backend are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePlan {
    tiers: Vec<ModelTier>,
}

impl CascadePlan {
    pub fn for_primary(primary: ModelTier, config: &RouterConfig, backends: &Backends) -> Self {
        Self::build(primary, config, backends, &[])
    }

    /// Like `for_primary`, but never revisits a tier in `attempted`.
    pub fn excluding(primary: ModelTier, config: &RouterConfig, backends: &Backends, attempted: &[ModelTier]) -> Self {
        Self::build(primary, config, backends, attempted)
    }

    fn build(primary: ModelTier, config: &RouterConfig, backends: &Backends, attempted: &[ModelTier]) -> Self {
        let mut tiers = Vec::new();
        if backends.has(primary) && !attempted.contains(&primary) {
            tiers.push(primary);
        }
        let mut i = 0;
        let mut frontier = vec![primary];
        while i < frontier.len() {
            let tier = frontier[i];
            i += 1;
            let Some(tc) = config.models.get(tier) else { continue };
            for next in tc.fallback_for(tier) {
                if next == primary || tiers.contains(&next) || attempted.contains(&next) || !backends.has(next) {
                    continue;
                }
                tiers.push(next);
                frontier.push(next);
            }
        }
        Self { tiers }
    }

    pub fn tiers(&self) -> &[ModelTier] {
        &self.tiers
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl IntoIterator for CascadePlan {
    type Item = ModelTier;
    type IntoIter = std::vec::IntoIter<ModelTier>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiers.into_iter()
    }
}
