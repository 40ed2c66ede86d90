//! Target resolution: which visible entity a command acts on

use crate::core::messages::Feedback;
use crate::host::{EntitySummary, FocusContext};
use crate::intent::Slots;

/// Why no target could be chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    /// `target_name` matched nothing addressable. Carries the name as spoken.
    NotFound { name: String },
    /// No name given and nothing focused
    NoFocus,
}

impl ResolveFailure {
    pub fn feedback(&self) -> Feedback {
        match self {
            ResolveFailure::NotFound { name } => Feedback::TargetNotFound { name: name.clone() },
            ResolveFailure::NoFocus => Feedback::FocusFirst,
        }
    }
}

/// How the target was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    Contextual,
    Name,
    FocusedDefault,
}

/// Resolves slots against one focus snapshot
pub struct ContextResolver<'a> {
    focus: &'a FocusContext,
}

impl<'a> ContextResolver<'a> {
    pub fn new(focus: &'a FocusContext) -> Self {
        Self { focus }
    }

    /// Pick the entity `slots` refers to
    pub fn resolve(&self, slots: &Slots) -> Result<&'a EntitySummary, ResolveFailure> {
        self.resolve_with_reason(slots).map(|(entity, _)| entity)
    }

    pub fn resolve_with_reason(
        &self,
        slots: &Slots,
    ) -> Result<(&'a EntitySummary, MatchReason), ResolveFailure> {
        let focused = self.focus.focused();

        // Contextual outranks an explicit name
        if slots.is_contextual() {
            if let Some(entity) = focused {
                return Ok((entity, MatchReason::Contextual));
            }
        }

        if let Some(name) = slots.target_name() {
            return self
                .focus
                .find_by_name(name)
                .map(|entity| (entity, MatchReason::Name))
                .ok_or_else(|| ResolveFailure::NotFound {
                    name: name.to_string(),
                });
        }

        focused
            .map(|entity| (entity, MatchReason::FocusedDefault))
            .ok_or(ResolveFailure::NoFocus)
    }
}
