//! Request-level dispatch: route, call, quality-gate, cascade.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{info, warn};
use tr_backend::Backends;
use tr_core::{
    Backend, BackendError, DistillationOutcome, GenerationOutcome, ModelTier, Priority, Result,
    RouterConfig, RoutingDecision, TierFailure, TrError,
};

use crate::cascade::CascadePlan;
use crate::distill::{accept_refinement, refine_prompt};
use crate::quality;

/// Stateless service built once from configuration and shared across requests.
pub struct Orchestrator {
    config: RouterConfig,
    backends: Backends,
}

fn failure_detail(err: &BackendError) -> String {
    if err.is_connectivity() {
        "unavailable".to_string()
    } else {
        err.to_string()
    }
}

impl Orchestrator {
    /// Pair a configuration with its backends. Every configured tier needs a
    /// backend reporting that tier, and no backend may serve an unconfigured tier.
    pub fn new(config: RouterConfig, backends: Backends) -> Result<Self> {
        for tier in ModelTier::ALL {
            match (config.models.get(tier).is_some(), backends.get(tier)) {
                (true, None) => {
                    return Err(TrError::Config(format!("tier {} is configured but has no backend", tier)));
                }
                (false, Some(_)) => {
                    return Err(TrError::Config(format!("backend given for unconfigured tier {}", tier)));
                }
                (true, Some(b)) if b.tier() != tier => {
                    return Err(TrError::Config(format!("backend for tier {} reports tier {}", tier, b.tier())));
                }
                _ => {}
            }
        }
        Ok(Self { config, backends })
    }

    /// Validate the configuration and build one HTTP backend per tier.
    pub fn from_config(config: RouterConfig) -> Result<Self> {
        config.validate()?;
        let backends = Backends::from_config(&config)?;
        Self::new(config, backends)
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn backends(&self) -> &Backends {
        &self.backends
    }

    pub fn route(&self, text: &str, priority: Priority) -> RoutingDecision {
        tr_router::route(text, priority, &self.config)
    }

    fn backend(&self, tier: ModelTier) -> Result<&Arc<dyn Backend>> {
        self.backends
            .get(tier)
            .ok_or_else(|| TrError::Config(format!("no backend for tier {}", tier)))
    }

    fn quality_gate_applies(&self, tier: ModelTier, use_fallback: bool) -> bool {
        tier == ModelTier::Local
            && self.backends.highest() != ModelTier::Local
            && self.config.routing.fallback_enabled
            && use_fallback
    }

    /// Route `prompt`, dispatch it, and fall back along the cascade when needed.
    ///
    /// Connectivity failures move forward whenever fallback is enabled in the
    /// configuration; other failures and the quality gate additionally need
    /// `use_fallback`. When every candidate fails the error names each attempt.
    pub async fn process(&self, prompt: &str, priority: Priority, use_fallback: bool) -> Result<GenerationOutcome> {
        let decision = self.route(prompt, priority);
        let primary = decision.model_type;
        let fallback_enabled = self.config.routing.fallback_enabled;

        let plan = CascadePlan::for_primary(primary, &self.config, &self.backends);
        if plan.is_empty() {
            return Err(TrError::Config(format!("no backend can serve tier {}", primary)));
        }
        let mut pending: VecDeque<ModelTier> = plan.into_iter().collect();
        let mut attempts: Vec<TierFailure> = Vec::new();
        let mut reasons: Vec<String> = Vec::new();

        while let Some(tier) = pending.pop_front() {
            let backend = self.backend(tier)?;
            info!(tier = %tier, attempt = attempts.len() + 1, "dispatching");

            match backend.generate(prompt, None).await {
                Ok(response) => {
                    if tier == primary && attempts.is_empty() && self.quality_gate_applies(tier, use_fallback) {
                        let verdict = quality::evaluate(&response, prompt);
                        if !verdict.passed() {
                            let target = self.backends.highest();
                            warn!(tier = %tier, escalate_to = %target, %verdict, "quality gate rejected response");
                            attempts.push(TierFailure::new(tier, verdict.to_string()));
                            reasons.push(format!("{} response quality insufficient, using {}", tier, target));
                            pending = CascadePlan::excluding(target, &self.config, &self.backends, &[tier])
                                .into_iter()
                                .collect();
                            continue;
                        }
                    }

                    if tier == primary && reasons.is_empty() {
                        return Ok(GenerationOutcome::primary(response, decision));
                    }
                    if reasons.is_empty() {
                        reasons.push(format!("{} was not dispatched, served by {}", primary, tier));
                    }
                    info!(tier = %tier, "served by fallback");
                    return Ok(GenerationOutcome::fallback(response, tier, decision, reasons.join("; ")));
                }
                Err(err) => {
                    attempts.push(TierFailure::new(tier, err.to_string()));
                    let may_cascade = fallback_enabled && (use_fallback || err.is_connectivity());
                    match pending.front().copied().filter(|_| may_cascade) {
                        Some(next) => {
                            warn!(tier = %tier, next = %next, error = %err, "backend failed, falling back");
                            reasons.push(format!("{} failed ({}) and fallback to {}", tier, failure_detail(&err), next));
                        }
                        None if attempts.len() == 1 => {
                            warn!(tier = %tier, error = %err, "backend failed, no fallback");
                            return Err(TrError::Backend { tier, source: err });
                        }
                        None => {
                            warn!(attempted = attempts.len(), "cascade exhausted");
                            return Err(TrError::Exhausted { attempts });
                        }
                    }
                }
            }
        }

        Err(TrError::Exhausted { attempts })
    }

    /// Refine the prompt on the local tier, then answer it on the highest tier.
    pub async fn distill_and_process(&self, prompt: &str) -> Result<DistillationOutcome> {
        let target = self.backends.highest();
        let refiner = self.backend(ModelTier::Local)?;
        let answerer = self.backend(target)?;

        match refiner.generate(&refine_prompt(prompt), None).await {
            Ok(refined) => {
                let (refined_prompt, distillation_used) = match accept_refinement(&refined) {
                    Some(r) => (r.to_string(), true),
                    None => (prompt.to_string(), false),
                };
                info!(distillation_used, target = %target, "answering refined prompt");
                let response = answerer
                    .generate(&refined_prompt, None)
                    .await
                    .map_err(|source| TrError::Backend { tier: target, source })?;
                Ok(DistillationOutcome {
                    response,
                    model_used: target,
                    refined_prompt,
                    original_prompt: prompt.to_string(),
                    distillation_used,
                    distillation_error: None,
                })
            }
            Err(refine_err) => {
                warn!(error = %refine_err, target = %target, "refinement failed, answering original prompt");
                match answerer.generate(prompt, None).await {
                    Ok(response) => Ok(DistillationOutcome {
                        response,
                        model_used: target,
                        refined_prompt: prompt.to_string(),
                        original_prompt: prompt.to_string(),
                        distillation_used: false,
                        distillation_error: Some(refine_err.to_string()),
                    }),
                    Err(answer_err) => Err(TrError::Exhausted {
                        attempts: vec![
                            TierFailure::new(ModelTier::Local, format!("refinement failed: {}", refine_err)),
                            TierFailure::new(target, answer_err.to_string()),
                        ],
                    }),
                }
            }
        }
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator").field("backends", &self.backends).finish()
    }
}
