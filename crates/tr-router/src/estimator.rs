//! Token, cost and latency estimates per tier.

use serde::Serialize;
use tr_core::{ModelTier, Result, RouterConfig, TierConfig};

use crate::complexity::word_count;

/// Fixed words-to-tokens ratio; not a tokenizer.
pub const TOKENS_PER_WORD: f64 = 1.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    pub tier: ModelTier,
    pub tokens: f64,
    pub cost: f64,
    pub latency: f64,
}

pub fn tokens_for_words(words: usize) -> f64 {
    words as f64 * TOKENS_PER_WORD
}

pub fn estimate_tokens(text: &str) -> f64 {
    tokens_for_words(word_count(text))
}

pub fn cost_for(tokens: f64, tier_config: &TierConfig) -> f64 {
    tokens * tier_config.cost_per_token
}

/// Seconds: tier base latency plus a per-token term.
pub fn latency_for(tokens: f64, tier: ModelTier, tier_config: &TierConfig) -> f64 {
    let (base, divisor) = tier_config.latency_profile(tier);
    base + tokens / divisor
}

pub fn estimate_for_tokens(tokens: f64, tier: ModelTier, tier_config: &TierConfig) -> Estimate {
    Estimate {
        tier,
        tokens,
        cost: cost_for(tokens, tier_config),
        latency: latency_for(tokens, tier, tier_config),
    }
}

/// Estimate `text` on `tier`. Fails only when the tier is not configured.
pub fn estimate(text: &str, tier: ModelTier, config: &RouterConfig) -> Result<Estimate> {
    let tier_config = config.tier(tier)?;
    Ok(estimate_for_tokens(estimate_tokens(text), tier, tier_config))
}

pub fn estimate_cost(text: &str, tier: ModelTier, config: &RouterConfig) -> Result<f64> {
    estimate(text, tier, config).map(|e| e.cost)
}

pub fn estimate_latency(text: &str, tier: ModelTier, config: &RouterConfig) -> Result<f64> {
    estimate(text, tier, config).map(|e| e.latency)
}
