//! Intent data model
//!
//! Command -> Resolution, where a Resolution is an intent plus its slots and
//! the pipeline stage that produced it.

pub mod catalog;
pub mod slots;

pub use catalog::{Intent, SlotName};
pub use slots::{ReactionType, SaveAction, Slots};

use crate::core::types::CommandId;
use serde::{Deserialize, Serialize};

/// One user utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub id: CommandId,
    /// Transcript exactly as received
    pub raw: String,
    /// Lower-cased, trimmed form used for table lookup
    pub normalized: String,
}

impl Command {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize(&raw);
        Self {
            id: CommandId::new(),
            raw,
            normalized,
        }
    }
}

/// Lower-case and trim an utterance
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Which pipeline stage produced a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolutionSource {
    Exact,
    Pattern,
    /// Decoded resolutions can only have come from the remote model
    #[default]
    Remote,
}

/// An intent occurrence with its slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub intent: Intent,
    #[serde(default, skip_serializing_if = "Slots::is_empty", deserialize_with = "slots::null_as_default")]
    pub slots: Slots,
    #[serde(skip)]
    pub source: ResolutionSource,
}

impl Resolution {
    pub fn new(intent: Intent, slots: Slots, source: ResolutionSource) -> Self {
        Self {
            intent,
            slots,
            source,
        }
    }

    /// An intent with no slots
    pub fn bare(intent: Intent, source: ResolutionSource) -> Self {
        Self::new(intent, Slots::default(), source)
    }

    /// The sentinel for "nothing understood"
    pub fn unknown() -> Self {
        Self::bare(Intent::Unknown, ResolutionSource::Remote)
    }

    /// A chained command holding `steps` in order
    pub fn chain(steps: Vec<Resolution>, source: ResolutionSource) -> Self {
        let slots = Slots {
            commands: steps,
            ..Slots::default()
        };
        Self::new(Intent::ChainedCommand, slots, source)
    }

    pub fn is_unknown(&self) -> bool {
        self.intent == Intent::Unknown
    }

    pub fn is_chain(&self) -> bool {
        self.intent == Intent::ChainedCommand
    }

    /// Child resolutions of a chain (empty for anything else)
    pub fn steps(&self) -> &[Resolution] {
        &self.slots.commands
    }

    /// Why this resolution could not be dispatched unambiguously, if it can't.
    ///
    /// Targets must not conflict, only a chain carries commands, a chain is
    /// never empty and chains never nest.
    pub fn shape_error(&self) -> Option<String> {
        self.shape_error_at(false)
    }

    fn shape_error_at(&self, nested: bool) -> Option<String> {
        if self.slots.has_conflicting_target() {
            return Some(format!("{} carries both is_contextual and target_name", self.intent));
        }
        if !self.is_chain() {
            if self.steps().is_empty() {
                return None;
            }
            return Some(format!("{} carries commands but is not a chain", self.intent));
        }
        if nested {
            return Some("chained command nested inside a chain".into());
        }
        if self.steps().is_empty() {
            return Some("chained command without commands".into());
        }
        self.steps().iter().find_map(|step| step.shape_error_at(true))
    }

    /// Stamp `source` on this resolution and every chained step
    pub fn with_source(mut self, source: ResolutionSource) -> Self {
        self.source = source;
        self.slots.commands = std::mem::take(&mut self.slots.commands)
            .into_iter()
            .map(|step| step.with_source(source))
            .collect();
        self
    }
}
