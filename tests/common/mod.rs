//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use voicebook::core::error::{Result, VoiceError};
use voicebook::core::types::UserId;
use voicebook::host::{Action, EntitySummary, FocusContext, Host};
use voicebook::llm::{NluBackend, NluContext};
use voicebook::{CommandPipeline, PipelineConfig, Resolution};

/// Host that records everything the pipeline does to it
pub struct RecordingHost {
    pub focus: FocusContext,
    pub friends: Vec<String>,
    pub actor: UserId,
    pub active: Arc<AtomicBool>,
    pub actions: Vec<Action>,
    pub messages: Vec<String>,
    pub processed: usize,
}

impl RecordingHost {
    pub fn new(focus: FocusContext) -> Self {
        Self {
            focus,
            friends: Vec::new(),
            actor: UserId::from("me"),
            active: Arc::new(AtomicBool::new(true)),
            actions: Vec::new(),
            messages: Vec::new(),
            processed: 0,
        }
    }

    pub fn mutations(&self) -> usize {
        self.actions.iter().filter(|a| a.is_mutation()).count()
    }

    pub fn last_message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

impl Host for RecordingHost {
    fn focus_context(&self) -> FocusContext {
        self.focus.clone()
    }

    fn friend_names(&self) -> Vec<String> {
        self.friends.clone()
    }

    fn current_actor(&self) -> UserId {
        self.actor.clone()
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn dispatch(&mut self, action: Action) {
        self.actions.push(action);
    }

    fn set_user_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn command_processed(&mut self) {
        self.processed += 1;
    }
}

/// Three organic posts and an ad; `p1` is focused. `p3` belongs to "me".
pub fn feed_focus() -> FocusContext {
    FocusContext::new(
        Some("p1".into()),
        vec![
            EntitySummary::post("p1", "Shojib Khan", "u-shojib"),
            EntitySummary::sponsored("ad1", "Acme Tea"),
            EntitySummary::post("p2", "Maria", "u-maria"),
            EntitySummary::post("p3", "Me Myself", "me"),
        ],
    )
}

/// Backend returning a fixed resolution and counting calls
pub struct StubNlu {
    response: Resolution,
    pub calls: Arc<AtomicUsize>,
    pub last_context: Arc<std::sync::Mutex<Option<NluContext>>>,
}

impl StubNlu {
    pub fn new(response: Resolution) -> Self {
        Self {
            response,
            calls: Arc::new(AtomicUsize::new(0)),
            last_context: Arc::new(std::sync::Mutex::new(None)),
        }
    }

    pub fn unknown() -> Self {
        Self::new(Resolution::unknown())
    }
}

#[async_trait]
impl NluBackend for StubNlu {
    async fn interpret(&self, _command: &str, context: &NluContext) -> Result<Resolution> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_context.lock() {
            *last = Some(context.clone());
        }
        Ok(self.response.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Backend whose transport always fails
pub struct FailingNlu;

#[async_trait]
impl NluBackend for FailingNlu {
    async fn interpret(&self, _command: &str, _context: &NluContext) -> Result<Resolution> {
        Err(VoiceError::LlmError("connection reset".into()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Backend that answers long after any sane timeout
pub struct SlowNlu(pub Resolution);

#[async_trait]
impl NluBackend for SlowNlu {
    async fn interpret(&self, _command: &str, _context: &NluContext) -> Result<Resolution> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "slow"
    }
}

/// Backend that tears the host down while "in flight"
pub struct TeardownNlu {
    pub active: Arc<AtomicBool>,
    pub response: Resolution,
}

#[async_trait]
impl NluBackend for TeardownNlu {
    async fn interpret(&self, _command: &str, _context: &NluContext) -> Result<Resolution> {
        self.active.store(false, Ordering::SeqCst);
        Ok(self.response.clone())
    }

    fn name(&self) -> &'static str {
        "teardown"
    }
}

/// Short remote timeout so timeout tests finish quickly
pub fn test_config() -> PipelineConfig {
    PipelineConfig {
        nlu_timeout_ms: 50,
        ..PipelineConfig::default()
    }
}

pub fn pipeline_with(backend: impl NluBackend + 'static) -> CommandPipeline {
    CommandPipeline::new(test_config(), Arc::new(backend)).expect("built-in pipeline")
}
