//! In-memory feed screen
//!
//! A concrete `Host` holding the state the real app keeps in its feed
//! screen: posts, focus, scroll, playback, and what the user did to each
//! post. Used by the interactive binary and the end-to-end tests.

use crate::core::types::{EntityId, EntityKind, EntityOrigin, UserId};
use crate::host::{Action, ComposerMode, EntitySummary, FocusContext, Host, ScrollState, View};
use crate::intent::ReactionType;
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

/// Maximum log entries to keep
const MAX_LOG_ENTRIES: usize = 50;

/// A post as the feed screen knows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: EntityId,
    pub author_name: String,
    pub author_id: Option<UserId>,
    pub origin: EntityOrigin,
    pub text: String,
}

impl Post {
    pub fn new(
        id: impl Into<EntityId>,
        author_name: impl Into<String>,
        author_id: impl Into<UserId>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author_name: author_name.into(),
            author_id: Some(author_id.into()),
            origin: EntityOrigin::Organic,
            text: text.into(),
        }
    }

    pub fn sponsored(id: impl Into<EntityId>, sponsor: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author_name: sponsor.into(),
            author_id: None,
            origin: EntityOrigin::Sponsored,
            text: text.into(),
        }
    }

    fn summary(&self) -> EntitySummary {
        EntitySummary {
            id: self.id.clone(),
            display_name: self.author_name.clone(),
            kind: EntityKind::Post,
            owner: self.author_id.clone(),
            origin: self.origin,
        }
    }
}

/// An entry in the screen log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    pub category: LogCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Action,
    Feedback,
}

/// Feed screen state
#[derive(Debug)]
pub struct FeedScreen {
    pub current_user: UserId,
    posts: Vec<Post>,
    friends: Vec<String>,
    /// Index into the visible (non-hidden) posts
    focus: Option<usize>,
    pub scroll: ScrollState,
    pub playing: bool,
    pub view: View,
    pub composer: Option<ComposerMode>,
    pub comment_sheet: Option<(EntityId, Option<String>)>,
    pub viewer: Option<EntityId>,
    pub search_query: Option<String>,
    pub hidden: AHashSet<EntityId>,
    pub saved: AHashSet<EntityId>,
    pub reported: AHashSet<EntityId>,
    pub reactions: AHashMap<EntityId, ReactionType>,
    pub shared: Vec<EntityId>,
    pub copied_links: Vec<String>,
    pub settings_saves: usize,
    pub reloads: usize,
    pub log: VecDeque<LogEntry>,
    last_message: Option<String>,
    unread: Vec<String>,
    processed: usize,
    active: bool,
}

impl FeedScreen {
    pub fn new(current_user: impl Into<UserId>, posts: Vec<Post>) -> Self {
        Self {
            current_user: current_user.into(),
            posts,
            friends: Vec::new(),
            focus: None,
            scroll: ScrollState::None,
            playing: false,
            view: View::Feed,
            composer: None,
            comment_sheet: None,
            viewer: None,
            search_query: None,
            hidden: AHashSet::new(),
            saved: AHashSet::new(),
            reported: AHashSet::new(),
            reactions: AHashMap::new(),
            shared: Vec::new(),
            copied_links: Vec::new(),
            settings_saves: 0,
            reloads: 0,
            log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            last_message: None,
            unread: Vec::new(),
            processed: 0,
            active: true,
        }
    }

    pub fn with_friends(mut self, friends: Vec<String>) -> Self {
        self.friends = friends;
        self
    }

    /// Posts that are not hidden, in feed order
    pub fn visible_posts(&self) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| !self.hidden.contains(&p.id))
            .collect()
    }

    pub fn post(&self, id: &EntityId) -> Option<&Post> {
        self.posts.iter().find(|p| &p.id == id)
    }

    /// The focused post, if any
    pub fn focused_post(&self) -> Option<&Post> {
        let index = self.focus?;
        self.visible_posts().get(index).copied()
    }

    /// Focus the visible post at `index` (ignored when out of range)
    pub fn focus_index(&mut self, index: usize) {
        if index < self.visible_posts().len() {
            self.focus = Some(index);
        }
    }

    /// Last feedback message shown to the user
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Messages shown since the last call
    pub fn drain_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.unread)
    }

    /// Number of completion signals received
    pub fn processed_count(&self) -> usize {
        self.processed
    }

    /// Simulate the screen being unmounted
    pub fn tear_down(&mut self) {
        self.active = false;
    }

    fn push_log(&mut self, message: String, category: LogCategory) {
        if self.log.len() >= MAX_LOG_ENTRIES {
            self.log.pop_front();
        }
        self.log.push_back(LogEntry { message, category });
    }

    fn clamp_focus(&mut self) {
        let len = self.visible_posts().len();
        self.focus = match self.focus {
            Some(_) if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            other => other,
        };
    }

    fn step_focus(&mut self, forward: bool) {
        let len = self.visible_posts().len();
        if len == 0 {
            return;
        }
        self.focus = Some(match (self.focus, forward) {
            (None, true) => 0,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) if i > 0 => i - 1,
            (_, false) => len - 1,
        });
        self.playing = true;
    }
}

impl Host for FeedScreen {
    fn focus_context(&self) -> FocusContext {
        let visible = self.visible_posts();
        let active = self
            .focus
            .and_then(|i| visible.get(i))
            .map(|p| p.id.clone());
        FocusContext::new(active, visible.iter().map(|p| p.summary()).collect())
    }

    fn friend_names(&self) -> Vec<String> {
        self.friends.clone()
    }

    fn current_actor(&self) -> UserId {
        self.current_user.clone()
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn dispatch(&mut self, action: Action) {
        self.push_log(format!("{:?}", action), LogCategory::Action);
        match action {
            Action::React { post, reaction } => {
                self.reactions.insert(post, reaction);
            }
            Action::OpenComments { post, draft } => {
                self.comment_sheet = Some((post, draft));
            }
            Action::Share { post } => self.shared.push(post),
            Action::SetSaved { post, saved } => {
                if saved {
                    self.saved.insert(post);
                } else {
                    self.saved.remove(&post);
                }
            }
            Action::Hide { post } => {
                self.hidden.insert(post);
                self.clamp_focus();
            }
            Action::Delete { post } => {
                self.posts.retain(|p| p.id != post);
                self.clamp_focus();
            }
            Action::CopyLink { post } => {
                self.copied_links.push(format!("https://voicebook.app/posts/{}", post));
            }
            Action::Report { post } => {
                self.reported.insert(post);
            }
            Action::OpenViewer { post } => self.viewer = Some(post),
            Action::Navigate(view) => self.view = view,
            Action::SetScroll(state) => self.scroll = state,
            Action::StartComposer(mode) => self.composer = Some(mode),
            Action::Search { query } => self.search_query = Some(query),
            Action::SaveSettings => self.settings_saves += 1,
            Action::FocusNext => self.step_focus(true),
            Action::FocusPrevious => self.step_focus(false),
            Action::Play => {
                if self.focus.is_none() && !self.visible_posts().is_empty() {
                    self.focus = Some(0);
                }
                self.playing = true;
            }
            Action::Pause => self.playing = false,
            Action::Reload => self.reloads += 1,
        }
    }

    fn set_user_message(&mut self, text: &str) {
        self.last_message = Some(text.to_string());
        self.unread.push(text.to_string());
        self.push_log(text.to_string(), LogCategory::Feedback);
    }

    fn command_processed(&mut self) {
        self.processed += 1;
    }
}
