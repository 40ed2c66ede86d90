//! VoiceBook - voice command resolution for a social feed
//!
//! Turns a transcribed utterance into actions on the screen the user is
//! looking at: exact phrases, then regex patterns, then a remote model,
//! then target resolution against the focused post and dispatch.

pub mod command;
pub mod core;
pub mod host;
pub mod intent;
pub mod llm;
pub mod matching;

pub use command::{CommandPipeline, Outcome};
pub use crate::core::{PipelineConfig, Result, VoiceError};
pub use host::{Action, FeedScreen, FocusContext, Host};
pub use intent::{Command, Intent, Resolution, Slots};
