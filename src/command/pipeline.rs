//! The resolve-then-dispatch pipeline
//!
//! Exact phrase table, then ordered patterns, then the remote model. The
//! first stage that produces a resolution wins and later stages never run.
//! The remote call is the only suspension point.

use crate::command::executor::{DispatchReport, Dispatcher};
use crate::core::config::PipelineConfig;
use crate::core::error::Result;
use crate::core::messages::Feedback;
use crate::host::Host;
use crate::intent::{Command, Resolution};
use crate::llm::{NluBackend, NluContext, RemoteFallback};
use crate::matching::{IntentTable, PatternMatcher};
use std::sync::Arc;
use tracing::Instrument;

/// How one utterance ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Resolved and handed to the dispatcher (which may still have failed)
    Dispatched {
        resolution: Resolution,
        report: DispatchReport,
    },
    /// The host went away while the remote stage was running
    Discarded { resolution: Resolution },
    /// Blank utterance
    Empty,
}

impl Outcome {
    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            Outcome::Dispatched { resolution, .. } | Outcome::Discarded { resolution } => {
                Some(resolution)
            }
            Outcome::Empty => None,
        }
    }

    pub fn report(&self) -> Option<&DispatchReport> {
        match self {
            Outcome::Dispatched { report, .. } => Some(report),
            _ => None,
        }
    }
}

pub struct CommandPipeline {
    table: IntentTable,
    matcher: PatternMatcher,
    fallback: RemoteFallback,
    dispatcher: Dispatcher,
    config: PipelineConfig,
}

impl CommandPipeline {
    /// Built-in phrases and rules, plus the configured phrase file if any
    pub fn new(config: PipelineConfig, backend: Arc<dyn NluBackend>) -> Result<Self> {
        let mut table = IntentTable::builtin();
        if let Some(path) = &config.phrases_file {
            let added = table.extend_from_file(path)?;
            tracing::info!(path = %path.display(), added, "loaded extra phrases");
        }
        let matcher = PatternMatcher::builtin()?;
        Ok(Self::with_stages(table, matcher, backend, config))
    }

    pub fn with_stages(
        table: IntentTable,
        matcher: PatternMatcher,
        backend: Arc<dyn NluBackend>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            table,
            matcher,
            fallback: RemoteFallback::new(backend, config.nlu_timeout()),
            dispatcher: Dispatcher::new(config.language),
            config,
        }
    }

    /// Offline stages only
    pub fn resolve_local(&self, command: &Command) -> Option<Resolution> {
        if let Some(resolution) = self.table.lookup(&command.normalized) {
            tracing::debug!(intent = %resolution.intent, "exact phrase hit");
            return Some(resolution);
        }
        self.matcher.match_command(&command.raw)
    }

    /// Resolve without dispatching. Never fails: misses become `unknown`.
    pub async fn resolve(&self, command: &Command, hints: &NluContext) -> Resolution {
        match self.resolve_local(command) {
            Some(resolution) => resolution,
            None => self.fallback.resolve(&command.raw, hints).await,
        }
    }

    /// Resolve one utterance and carry it out on `host`.
    ///
    /// `command_processed` is signalled exactly once whatever happens.
    pub async fn resolve_and_dispatch<H: Host + ?Sized>(&self, raw: &str, host: &mut H) -> Outcome {
        let command = Command::new(raw);
        let span = tracing::info_span!("command", id = %command.id);
        let outcome = self.run(&command, host).instrument(span).await;
        host.command_processed();
        outcome
    }

    async fn run<H: Host + ?Sized>(&self, command: &Command, host: &mut H) -> Outcome {
        if command.normalized.is_empty() {
            return Outcome::Empty;
        }
        tracing::debug!(text = %command.raw, "resolving");

        let resolution = match self.resolve_local(command) {
            Some(resolution) => resolution,
            None => {
                let hints = NluContext::from_focus(&host.focus_context(), &host.friend_names());
                let resolution = self.fallback.resolve(&command.raw, &hints).await;
                if !host.is_active() {
                    tracing::warn!(intent = %resolution.intent, "host torn down during remote call, discarding");
                    return Outcome::Discarded { resolution };
                }
                resolution
            }
        };

        if resolution.is_unknown() {
            let feedback = Feedback::GenericFailure;
            host.set_user_message(&feedback.render(self.config.language));
            return Outcome::Dispatched {
                resolution,
                report: DispatchReport {
                    dispatched: Vec::new(),
                    failure: Some(feedback),
                },
            };
        }

        // One snapshot for every step, including chained ones
        let focus = host.focus_context();
        let actor = host.current_actor();
        let report = self.dispatcher.execute(&resolution, &focus, &actor, host);

        Outcome::Dispatched { resolution, report }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Action, FeedScreen};
    use crate::host::feed::Post;
    use crate::intent::{Intent, ResolutionSource};
    use crate::llm::OfflineNlu;

    fn pipeline() -> CommandPipeline {
        CommandPipeline::new(PipelineConfig::default(), Arc::new(OfflineNlu)).unwrap()
    }

    fn screen() -> FeedScreen {
        let mut screen = FeedScreen::new(
            "me",
            vec![
                Post::new("p1", "Shojib Khan", "u-shojib", "hello"),
                Post::new("p2", "Maria", "u-maria", "hi"),
            ],
        );
        screen.focus_index(0);
        screen
    }

    #[tokio::test]
    async fn test_exact_phrase_dispatches() {
        let mut host = screen();
        let outcome = pipeline().resolve_and_dispatch("Like This Post", &mut host).await;
        let resolution = outcome.resolution().unwrap();
        assert_eq!(resolution.source, ResolutionSource::Exact);
        assert_eq!(host.reactions.len(), 1);
        assert_eq!(host.processed_count(), 1);
    }

    #[tokio::test]
    async fn test_pattern_dispatches() {
        let mut host = screen();
        let outcome = pipeline().resolve_and_dispatch("love Maria's post", &mut host).await;
        assert_eq!(outcome.resolution().unwrap().source, ResolutionSource::Pattern);
        assert_eq!(
            outcome.report().unwrap().dispatched,
            vec![Action::React {
                post: "p2".into(),
                reaction: crate::intent::ReactionType::Love
            }]
        );
    }

    #[tokio::test]
    async fn test_unknown_gets_generic_message() {
        let mut host = screen();
        let outcome = pipeline().resolve_and_dispatch("sing me a song", &mut host).await;
        assert_eq!(outcome.resolution().unwrap().intent, Intent::Unknown);
        assert_eq!(
            host.last_message(),
            Some("Sorry, I didn't understand that. Please try again.")
        );
        assert_eq!(host.processed_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_is_empty_but_completes() {
        let mut host = screen();
        let outcome = pipeline().resolve_and_dispatch("   ", &mut host).await;
        assert_eq!(outcome, Outcome::Empty);
        assert_eq!(host.processed_count(), 1);
        assert_eq!(host.last_message(), None);
    }

    #[tokio::test]
    async fn test_resolve_does_not_touch_host() {
        let resolution = pipeline()
            .resolve(&Command::new("next post"), &NluContext::empty())
            .await;
        assert_eq!(resolution.intent, Intent::NextPost);
    }
}
