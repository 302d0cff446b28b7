//! Weighted cost / latency / quality score used by balanced routing.

use tr_core::{ModelTier, RoutingParams};

use crate::estimator::Estimate;

/// Expected answer quality of a tier for a prompt of the given complexity.
pub fn quality(tier: ModelTier, complexity: f64) -> f64 {
    match tier {
        ModelTier::Local => (1.0 - complexity * 0.5).max(0.5),
        ModelTier::General => (complexity * 1.2).min(1.0),
        ModelTier::FastCloud => (complexity * 1.3).min(1.0),
    }
}

/// Weights are applied as given; they are not normalized.
pub fn weighted_score(estimate: &Estimate, complexity: f64, params: &RoutingParams) -> f64 {
    params.cost_weight * (1.0 - estimate.cost * 100.0)
        + params.latency_weight * (1.0 - estimate.latency / 10.0)
        + params.quality_weight * quality(estimate.tier, complexity)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierScores {
    pub local: f64,
    pub general: f64,
    /// `None` when fast-cloud is not configured or the input is below its threshold.
    pub fast_cloud: Option<f64>,
}

impl TierScores {
    /// Highest score wins. Ties go fast-cloud, then local, then general.
    /// Local is only eligible below `local_ceiling` complexity.
    pub fn winner(&self, complexity: f64, local_ceiling: f64) -> ModelTier {
        if let Some(fast) = self.fast_cloud {
            if fast > 0.0 && fast >= self.local.max(self.general) {
                return ModelTier::FastCloud;
            }
        }
        if self.local >= self.general && complexity < local_ceiling {
            ModelTier::Local
        } else {
            ModelTier::General
        }
    }

    pub fn get(&self, tier: ModelTier) -> f64 {
        match tier {
            ModelTier::Local => self.local,
            ModelTier::General => self.general,
            ModelTier::FastCloud => self.fast_cloud.unwrap_or(0.0),
        }
    }
}
