//! The screen that owns UI state and carries out dispatched actions
//!
//! The pipeline never touches persistence or rendering itself. It reads a
//! `FocusContext`, then hands the host one `Action` at a time.

pub mod feed;
pub mod focus;

pub use feed::FeedScreen;
pub use focus::{EntitySummary, FocusContext};

use crate::core::types::{EntityId, UserId};
use crate::intent::ReactionType;

/// Continuous scroll state of the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollState {
    #[default]
    None,
    Up,
    Down,
}

/// Variants of the post composer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerMode {
    Text,
    Voice,
    Poll,
    Image { prompt: String },
}

/// Screens the app can navigate to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Feed,
    Explore,
    Reels,
    /// `name: None` is the current user's own profile
    Profile {
        name: Option<String>,
        initial_tab: Option<String>,
    },
    Messages,
    Conversation { with: String },
    GroupsHub,
    RoomsHub,
    AudioRooms,
    VideoRooms,
    Friends { initial_tab: Option<String> },
    Settings,
    AdsCenter,
    Help,
    Back,
}

/// The closed set of things a command can make the host do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    React {
        post: EntityId,
        reaction: ReactionType,
    },
    /// Open the comment sheet, optionally pre-filled with a draft
    OpenComments {
        post: EntityId,
        draft: Option<String>,
    },
    Share {
        post: EntityId,
    },
    SetSaved {
        post: EntityId,
        saved: bool,
    },
    Hide {
        post: EntityId,
    },
    Delete {
        post: EntityId,
    },
    CopyLink {
        post: EntityId,
    },
    Report {
        post: EntityId,
    },
    OpenViewer {
        post: EntityId,
    },
    Navigate(View),
    SetScroll(ScrollState),
    StartComposer(ComposerMode),
    Search {
        query: String,
    },
    SaveSettings,
    FocusNext,
    FocusPrevious,
    Play,
    Pause,
    Reload,
}

impl Action {
    /// Whether the action changes persisted content
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Action::React { .. }
                | Action::SetSaved { .. }
                | Action::Hide { .. }
                | Action::Delete { .. }
                | Action::Report { .. }
                | Action::SaveSettings
        )
    }
}

/// What the pipeline needs from the screen it runs on
pub trait Host {
    /// Current focus snapshot
    fn focus_context(&self) -> FocusContext;

    /// Friend names, passed to the remote stage as disambiguation hints
    fn friend_names(&self) -> Vec<String>;

    /// The signed-in user
    fn current_actor(&self) -> UserId;

    /// False once the screen has been torn down
    fn is_active(&self) -> bool;

    /// Carry out one action
    fn dispatch(&mut self, action: Action);

    /// Show or speak a feedback message
    fn set_user_message(&mut self, text: &str);

    /// Processing of the current utterance is finished
    fn command_processed(&mut self);
}
