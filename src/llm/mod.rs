//! Remote NLU: the LLM client, prompt contract and timeout-bounded fallback

pub mod backend;
pub mod client;
pub mod context;
pub mod fallback;
pub mod parser;

pub use backend::{LlmNlu, NluBackend, OfflineNlu};
pub use client::LlmClient;
pub use context::NluContext;
pub use fallback::RemoteFallback;
