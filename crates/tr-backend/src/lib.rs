//! HTTP clients for each tier and the set the orchestrator dispatches to.
//!
//! - `ollama`: local chat endpoint (`/api/chat`, non-streaming)
//! - `gemini`: Google `generateContent`
//! - `set`: one backend per configured tier

pub mod gemini;
pub mod ollama;
pub mod set;
mod transport;

pub use gemini::GeminiBackend;
pub use ollama::OllamaBackend;
pub use set::{build_backend, Backends};
