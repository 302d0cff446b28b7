pub mod backend;
pub mod config;
pub mod error;
pub mod types;

pub use backend::Backend;
pub use config::{ModelsConfig, Provider, RouterConfig, RoutingParams, ServerConfig, TierConfig};
pub use error::{BackendError, Result, TierFailure, TrError};
pub use types::{DistillationOutcome, GenerationOutcome, ModelTier, Priority, RoutingDecision};
