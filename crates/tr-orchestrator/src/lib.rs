//! Fallback orchestrator: dispatches a routing decision and walks the cascade.
//!
//! - `quality`: heuristic gate on local-tier answers
//! - `cascade`: ordered candidate tiers for a request
//! - `distill`: refine-then-answer helpers
//! - `orchestrator`: `process` and `distill_and_process`

pub mod cascade;
pub mod distill;
pub mod orchestrator;
pub mod quality;

pub use cascade::CascadePlan;
pub use orchestrator::Orchestrator;
pub use quality::{check_quality, QualityVerdict};
