//! Slot payloads attached to an intent occurrence

use crate::intent::Resolution;
use serde::{Deserialize, Deserializer, Serialize};

/// Reaction a user can leave on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReactionType {
    #[default]
    Like,
    Love,
    Haha,
    Sad,
    Wow,
    Angry,
}

impl ReactionType {
    /// Parse a spoken reaction word. Case-insensitive; unrecognised words
    /// fall back to `Like`.
    pub fn parse(word: &str) -> Self {
        match word.trim().to_lowercase().as_str() {
            "love" | "heart" | "bhalobasha" => ReactionType::Love,
            "haha" | "laugh" | "hashi" => ReactionType::Haha,
            "sad" | "kanna" => ReactionType::Sad,
            "wow" => ReactionType::Wow,
            "angry" | "raag" => ReactionType::Angry,
            _ => ReactionType::Like,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReactionType::Like => "like",
            ReactionType::Love => "love",
            ReactionType::Haha => "haha",
            ReactionType::Sad => "sad",
            ReactionType::Wow => "wow",
            ReactionType::Angry => "angry",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            ReactionType::Like => "👍",
            ReactionType::Love => "❤️",
            ReactionType::Haha => "😂",
            ReactionType::Sad => "😢",
            ReactionType::Wow => "😮",
            ReactionType::Angry => "😡",
        }
    }
}

impl From<String> for ReactionType {
    fn from(word: String) -> Self {
        ReactionType::parse(&word)
    }
}

impl From<ReactionType> for String {
    fn from(reaction: ReactionType) -> Self {
        reaction.as_str().to_string()
    }
}

/// Save or unsave, selected by the `action` slot of `intent_save_post`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SaveAction {
    #[default]
    Save,
    Unsave,
}

impl From<String> for SaveAction {
    fn from(word: String) -> Self {
        if word.trim().eq_ignore_ascii_case("unsave") {
            SaveAction::Unsave
        } else {
            SaveAction::Save
        }
    }
}

impl From<SaveAction> for String {
    fn from(action: SaveAction) -> Self {
        match action {
            SaveAction::Save => "save".into(),
            SaveAction::Unsave => "unsave".into(),
        }
    }
}

/// Named parameters of one intent occurrence.
///
/// The key set is closed: decoding a payload with any other key fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slots {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_contextual: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_type: Option<ReactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<SaveAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_tab: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setting: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Ordered sub-commands of `intent_chained_command`
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub commands: Vec<Resolution>,
}

impl Slots {
    /// Slots for a command aimed at whatever is focused on screen
    pub fn contextual() -> Self {
        Self {
            is_contextual: Some(true),
            ..Self::default()
        }
    }

    /// Slots for a command naming its target explicitly
    pub fn targeted(name: impl Into<String>) -> Self {
        Self {
            target_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_reaction(mut self, reaction: ReactionType) -> Self {
        self.reaction_type = Some(reaction);
        self
    }

    pub fn with_action(mut self, action: SaveAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_initial_tab(mut self, tab: impl Into<String>) -> Self {
        self.initial_tab = Some(tab.into());
        self
    }

    pub fn with_comment_text(mut self, text: impl Into<String>) -> Self {
        self.comment_text = Some(text.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// True when the command binds to the focused entity
    pub fn is_contextual(&self) -> bool {
        self.is_contextual.unwrap_or(false)
    }

    /// The explicit target name, if present and not blank
    pub fn target_name(&self) -> Option<&str> {
        self.target_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// A well-formed payload never carries both the contextual flag and a name
    pub fn has_conflicting_target(&self) -> bool {
        self.is_contextual() && self.target_name().is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Slots::default()
    }
}

/// Treat an explicit JSON `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
