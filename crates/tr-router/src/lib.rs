//! Tier router: picks local, general or fast-cloud for a prompt.
//!
//! Rules are evaluated in order and the first match wins: very large input,
//! cost priority, speed priority, high complexity, then a weighted score.

pub mod complexity;
pub mod estimator;
pub mod scoring;

pub use complexity::{analyze, analyze_complexity, ComplexityReport};
pub use estimator::{estimate, estimate_cost, estimate_latency, estimate_tokens, Estimate};
pub use scoring::{quality, weighted_score, TierScores};

use tr_core::{ModelTier, Priority, RouterConfig, RoutingDecision, TierConfig};

use estimator::{estimate_for_tokens, tokens_for_words};

/// Complexity below which cost priority may pick local.
const COST_LOCAL_CEILING: f64 = 0.8;
/// Complexity below which speed priority and balanced scoring may pick local.
const LOCAL_CEILING: f64 = 0.7;

fn decision(
    tier: ModelTier,
    tier_config: &TierConfig,
    tokens: f64,
    confidence: f64,
    reason: String,
) -> RoutingDecision {
    let e = estimate_for_tokens(tokens, tier, tier_config);
    RoutingDecision {
        model_type: tier,
        confidence,
        reason,
        estimated_cost: e.cost,
        estimated_latency: e.latency,
    }
}

/// Route a prompt. Pure: identical inputs give identical decisions.
pub fn route(text: &str, priority: Priority, config: &RouterConfig) -> RoutingDecision {
    let report = analyze(text);
    let d = decide(&report, priority, config);
    tracing::debug!(
        tier = %d.model_type,
        confidence = d.confidence,
        complexity = report.score,
        signals = ?report.signals(),
        priority = %priority,
        "routing decision"
    );
    d
}

fn decide(report: &ComplexityReport, priority: Priority, config: &RouterConfig) -> RoutingDecision {
    let params = &config.routing;
    let models = &config.models;
    let complexity = report.score;
    let words = report.words;
    let tokens = tokens_for_words(words);
    let fast_cloud = models.fast_cloud.as_ref();

    if let Some(fc) = fast_cloud {
        if tokens >= params.large_input_threshold {
            return decision(
                ModelTier::FastCloud,
                fc,
                tokens,
                0.95,
                format!("Very large input ({:.0} tokens) - routing to fast-cloud for speed and reliability", tokens),
            );
        }
    }

    match priority {
        Priority::Cost => {
            if complexity < COST_LOCAL_CEILING && words < params.max_slm_tokens {
                return decision(
                    ModelTier::Local,
                    &models.local,
                    tokens,
                    0.8,
                    format!("Low complexity task ({:.2}), cost-optimized", complexity),
                );
            }
        }
        Priority::Speed => {
            if let Some(fc) = fast_cloud {
                if tokens >= params.fast_cloud_preferred_threshold {
                    return decision(
                        ModelTier::FastCloud,
                        fc,
                        tokens,
                        0.9,
                        format!("Large input ({:.0} tokens) - fast-cloud preferred for speed", tokens),
                    );
                }
            }
            if complexity < LOCAL_CEILING {
                return decision(
                    ModelTier::Local,
                    &models.local,
                    tokens,
                    0.75,
                    format!("Simple task ({:.2}), speed-optimized", complexity),
                );
            }
        }
        Priority::Balanced => {}
    }

    if complexity > params.complexity_threshold || words > params.max_slm_tokens {
        if let Some(fc) = fast_cloud {
            if tokens >= params.fast_cloud_preferred_threshold {
                return decision(
                    ModelTier::FastCloud,
                    fc,
                    tokens,
                    0.9,
                    format!(
                        "High complexity ({:.2}) and large input ({:.0} tokens) - fast-cloud preferred",
                        complexity, tokens
                    ),
                );
            }
        }
        return decision(
            ModelTier::General,
            &models.general,
            tokens,
            0.9,
            format!("High complexity ({:.2}) or long input ({} words)", complexity, words),
        );
    }

    let local = estimate_for_tokens(tokens, ModelTier::Local, &models.local);
    let general = estimate_for_tokens(tokens, ModelTier::General, &models.general);
    let fast = fast_cloud
        .filter(|_| tokens >= params.fast_cloud_preferred_threshold)
        .map(|fc| estimate_for_tokens(tokens, ModelTier::FastCloud, fc));

    let scores = TierScores {
        local: weighted_score(&local, complexity, params),
        general: weighted_score(&general, complexity, params),
        fast_cloud: fast.as_ref().map(|e| weighted_score(e, complexity, params)),
    };

    let winner = scores.winner(complexity, LOCAL_CEILING);
    let chosen = match winner {
        ModelTier::Local => local,
        ModelTier::General => general,
        ModelTier::FastCloud => fast.unwrap_or(general),
    };
    let confidence = if winner == ModelTier::Local { 0.7 } else { 0.85 };
    let mut reason = format!(
        "Balanced decision: {} preferred (score: {:.2}, complexity: {:.2}",
        winner,
        scores.get(winner),
        complexity
    );
    if winner == ModelTier::FastCloud {
        reason += &format!(", {:.0} tokens", tokens);
    }
    reason.push(')');

    RoutingDecision {
        model_type: chosen.tier,
        confidence,
        reason,
        estimated_cost: chosen.cost,
        estimated_latency: chosen.latency,
    }
}

#[cfg(test)]
mod tests;
