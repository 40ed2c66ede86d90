//! Disambiguation hints sent to the remote model
//!
//! Built from the host's focus snapshot and friend list before the remote
//! call, so the model can prefer names that are actually on screen.

use crate::host::FocusContext;
use serde::Serialize;

/// Hints for the remote NLU stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NluContext {
    /// Visible entity names then friend names, de-duplicated, order kept
    pub user_names: Vec<String>,
    /// Name on the focused post; absent for sponsored or system posts
    pub active_author_name: Option<String>,
}

impl NluContext {
    /// Build hints from a focus snapshot plus friend names
    pub fn from_focus(focus: &FocusContext, friends: &[String]) -> Self {
        let mut user_names: Vec<String> = Vec::new();
        let candidates = focus.visible_names().chain(friends.iter().map(String::as_str));
        for name in candidates {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            if !user_names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                user_names.push(name.to_string());
            }
        }

        Self {
            user_names,
            active_author_name: focus.focused_name().map(str::to_string),
        }
    }

    /// An empty context for callers with no screen
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.user_names.is_empty() && self.active_author_name.is_none()
    }

    /// Text block appended to the prompt
    pub fn summary(&self) -> String {
        let mut s = String::new();

        if !self.user_names.is_empty() {
            s.push_str(&format!(
                "Known user names (prefer these spellings for target_name): {}\n",
                self.user_names.join(", ")
            ));
        }

        if let Some(author) = &self.active_author_name {
            s.push_str(&format!(
                "The post currently in focus is by {}. Commands with no name refer to it.\n",
                author
            ));
        }

        s
    }
}
