//! Swappable remote NLU capability

use crate::core::error::Result;
use crate::intent::Resolution;
use crate::llm::client::LlmClient;
use crate::llm::context::NluContext;
use crate::llm::parser;
use async_trait::async_trait;

/// Something that can classify an utterance the local stages missed
#[async_trait]
pub trait NluBackend: Send + Sync {
    /// Classify `command`. Errors are degraded to `unknown` by the caller.
    async fn interpret(&self, command: &str, context: &NluContext) -> Result<Resolution>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Production backend backed by an HTTP LLM API
pub struct LlmNlu {
    client: LlmClient,
}

impl LlmNlu {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Build from `LLM_*` environment variables
    pub fn from_env(max_tokens: u32) -> Result<Self> {
        Ok(Self::new(LlmClient::from_env()?.with_max_tokens(max_tokens)))
    }
}

#[async_trait]
impl NluBackend for LlmNlu {
    async fn interpret(&self, command: &str, context: &NluContext) -> Result<Resolution> {
        parser::parse_command(&self.client, command, context).await
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}

/// Backend for running without network access. Never understands anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineNlu;

#[async_trait]
impl NluBackend for OfflineNlu {
    async fn interpret(&self, _command: &str, _context: &NluContext) -> Result<Resolution> {
        Ok(Resolution::unknown())
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}
