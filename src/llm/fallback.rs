//! Third resolution stage: the remote model, bounded by a timeout
//!
//! The caller never sees an error from here. Transport failures, timeouts
//! and non-conforming replies all come back as the `unknown` sentinel.

use crate::core::error::{Result, VoiceError};
use crate::intent::{Resolution, ResolutionSource};
use crate::llm::backend::NluBackend;
use crate::llm::context::NluContext;
use crate::llm::parser;
use std::sync::Arc;
use std::time::Duration;

pub struct RemoteFallback {
    backend: Arc<dyn NluBackend>,
    timeout: Duration,
}

impl RemoteFallback {
    pub fn new(backend: Arc<dyn NluBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Classify `command`, degrading every failure to `unknown`
    pub async fn resolve(&self, command: &str, context: &NluContext) -> Resolution {
        match self.try_resolve(command, context).await {
            Ok(resolution) => {
                tracing::debug!(intent = %resolution.intent, backend = self.backend.name(), "remote resolved");
                resolution
            }
            Err(e) => {
                tracing::warn!(error = %e, backend = self.backend.name(), "remote NLU failed, treating as unknown");
                Resolution::unknown()
            }
        }
    }

    /// Classify `command`, surfacing the failure reason
    pub async fn try_resolve(&self, command: &str, context: &NluContext) -> Result<Resolution> {
        let resolution = tokio::time::timeout(self.timeout, self.backend.interpret(command, context))
            .await
            .map_err(|_| VoiceError::Timeout(self.timeout.as_millis() as u64))??;

        parser::validate(&resolution)?;
        Ok(resolution.with_source(ResolutionSource::Remote))
    }
}
