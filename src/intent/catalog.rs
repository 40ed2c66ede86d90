//! Static intent catalog
//!
//! Every intent the app understands, with its wire name and the slots it
//! may carry. The catalog is fixed at compile time; the remote NLU prompt
//! lists intents from here so the model and the dispatcher agree on names.

use serde::{Deserialize, Serialize};

/// Named slots an intent may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotName {
    IsContextual,
    TargetName,
    ReactionType,
    CommentText,
    Prompt,
    MessageContent,
    Action,
    InitialTab,
    Index,
    Field,
    Value,
    Setting,
    EmojiType,
    GroupName,
    SearchQuery,
    ThemeName,
    CaptionText,
    Text,
    Commands,
}

impl SlotName {
    /// Wire name of the slot
    pub fn as_str(self) -> &'static str {
        match self {
            SlotName::IsContextual => "is_contextual",
            SlotName::TargetName => "target_name",
            SlotName::ReactionType => "reaction_type",
            SlotName::CommentText => "comment_text",
            SlotName::Prompt => "prompt",
            SlotName::MessageContent => "message_content",
            SlotName::Action => "action",
            SlotName::InitialTab => "initial_tab",
            SlotName::Index => "index",
            SlotName::Field => "field",
            SlotName::Value => "value",
            SlotName::Setting => "setting",
            SlotName::EmojiType => "emoji_type",
            SlotName::GroupName => "group_name",
            SlotName::SearchQuery => "search_query",
            SlotName::ThemeName => "theme_name",
            SlotName::CaptionText => "caption_text",
            SlotName::Text => "text",
            SlotName::Commands => "commands",
        }
    }
}

/// A named user goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Intent {
    // Navigation
    OpenFeed,
    OpenExplore,
    OpenReels,
    OpenProfile,
    OpenMessages,
    OpenGroupsHub,
    OpenRoomsHub,
    OpenAudioRooms,
    OpenVideoRooms,
    OpenFriendsPage,
    OpenSettings,
    OpenAdsCenter,
    GoBack,
    ReloadPage,
    Help,
    // Feed interaction
    PlayPost,
    PausePost,
    NextPost,
    PreviousPost,
    ScrollUp,
    ScrollDown,
    StopScroll,
    ReactToPost,
    Comment,
    AddCommentText,
    ViewComments,
    OpenPostViewer,
    Share,
    SavePost,
    HidePost,
    CopyLink,
    ReportPost,
    DeletePost,
    // Content creation
    CreatePost,
    CreateVoicePost,
    CreatePoll,
    GenerateImage,
    StopRecording,
    PostConfirm,
    DictateCaption,
    DictateComment,
    StopDictation,
    // Friends and messaging
    SearchUser,
    OpenChat,
    AddFriend,
    SendMessage,
    SendTextMessageWithContent,
    // Settings
    SaveSettings,
    // Meta
    ChainedCommand,
    Unknown,
}

impl Intent {
    pub const ALL: &'static [Intent] = &[
        Intent::OpenFeed,
        Intent::OpenExplore,
        Intent::OpenReels,
        Intent::OpenProfile,
        Intent::OpenMessages,
        Intent::OpenGroupsHub,
        Intent::OpenRoomsHub,
        Intent::OpenAudioRooms,
        Intent::OpenVideoRooms,
        Intent::OpenFriendsPage,
        Intent::OpenSettings,
        Intent::OpenAdsCenter,
        Intent::GoBack,
        Intent::ReloadPage,
        Intent::Help,
        Intent::PlayPost,
        Intent::PausePost,
        Intent::NextPost,
        Intent::PreviousPost,
        Intent::ScrollUp,
        Intent::ScrollDown,
        Intent::StopScroll,
        Intent::ReactToPost,
        Intent::Comment,
        Intent::AddCommentText,
        Intent::ViewComments,
        Intent::OpenPostViewer,
        Intent::Share,
        Intent::SavePost,
        Intent::HidePost,
        Intent::CopyLink,
        Intent::ReportPost,
        Intent::DeletePost,
        Intent::CreatePost,
        Intent::CreateVoicePost,
        Intent::CreatePoll,
        Intent::GenerateImage,
        Intent::StopRecording,
        Intent::PostConfirm,
        Intent::DictateCaption,
        Intent::DictateComment,
        Intent::StopDictation,
        Intent::SearchUser,
        Intent::OpenChat,
        Intent::AddFriend,
        Intent::SendMessage,
        Intent::SendTextMessageWithContent,
        Intent::SaveSettings,
        Intent::ChainedCommand,
        Intent::Unknown,
    ];

    /// Wire name, as used by the phrase table, the NLU contract and logs
    pub fn name(self) -> &'static str {
        match self {
            Intent::OpenFeed => "intent_open_feed",
            Intent::OpenExplore => "intent_open_explore",
            Intent::OpenReels => "intent_open_reels",
            Intent::OpenProfile => "intent_open_profile",
            Intent::OpenMessages => "intent_open_messages",
            Intent::OpenGroupsHub => "intent_open_groups_hub",
            Intent::OpenRoomsHub => "intent_open_rooms_hub",
            Intent::OpenAudioRooms => "intent_open_audio_rooms",
            Intent::OpenVideoRooms => "intent_open_video_rooms",
            Intent::OpenFriendsPage => "intent_open_friends_page",
            Intent::OpenSettings => "intent_open_settings",
            Intent::OpenAdsCenter => "intent_open_ads_center",
            Intent::GoBack => "intent_go_back",
            Intent::ReloadPage => "intent_reload_page",
            Intent::Help => "intent_help",
            Intent::PlayPost => "intent_play_post",
            Intent::PausePost => "intent_pause_post",
            Intent::NextPost => "intent_next_post",
            Intent::PreviousPost => "intent_previous_post",
            Intent::ScrollUp => "intent_scroll_up",
            Intent::ScrollDown => "intent_scroll_down",
            Intent::StopScroll => "intent_stop_scroll",
            Intent::ReactToPost => "intent_react_to_post",
            Intent::Comment => "intent_comment",
            Intent::AddCommentText => "intent_add_comment_text",
            Intent::ViewComments => "intent_view_comments",
            Intent::OpenPostViewer => "intent_open_post_viewer",
            Intent::Share => "intent_share",
            Intent::SavePost => "intent_save_post",
            Intent::HidePost => "intent_hide_post",
            Intent::CopyLink => "intent_copy_link",
            Intent::ReportPost => "intent_report_post",
            Intent::DeletePost => "intent_delete_post",
            Intent::CreatePost => "intent_create_post",
            Intent::CreateVoicePost => "intent_create_voice_post",
            Intent::CreatePoll => "intent_create_poll",
            Intent::GenerateImage => "intent_generate_image",
            Intent::StopRecording => "intent_stop_recording",
            Intent::PostConfirm => "intent_post_confirm",
            Intent::DictateCaption => "intent_dictate_caption",
            Intent::DictateComment => "intent_dictate_comment",
            Intent::StopDictation => "intent_stop_dictation",
            Intent::SearchUser => "intent_search_user",
            Intent::OpenChat => "intent_open_chat",
            Intent::AddFriend => "intent_add_friend",
            Intent::SendMessage => "intent_send_message",
            Intent::SendTextMessageWithContent => "intent_send_text_message_with_content",
            Intent::SaveSettings => "intent_save_settings",
            Intent::ChainedCommand => "intent_chained_command",
            Intent::Unknown => "unknown",
        }
    }

    /// Look up an intent by wire name. Anything unrecognised is `Unknown`.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|intent| intent.name() == name)
            .unwrap_or(Intent::Unknown)
    }

    /// Slots this intent extracts (beyond the contextual flag)
    pub fn slot_schema(self) -> &'static [SlotName] {
        match self {
            Intent::OpenProfile => &[SlotName::TargetName, SlotName::InitialTab],
            Intent::OpenFriendsPage => &[SlotName::InitialTab],
            Intent::ReactToPost => &[SlotName::ReactionType, SlotName::TargetName],
            Intent::Comment | Intent::ViewComments => &[SlotName::TargetName],
            Intent::AddCommentText => &[SlotName::CommentText],
            Intent::SavePost => &[SlotName::Action],
            Intent::GenerateImage => &[SlotName::Prompt],
            Intent::SearchUser
            | Intent::OpenChat
            | Intent::AddFriend
            | Intent::SendMessage => &[SlotName::TargetName],
            Intent::SendTextMessageWithContent => &[SlotName::MessageContent],
            Intent::ChainedCommand => &[SlotName::Commands],
            _ => &[],
        }
    }

    /// Whether dispatching this intent needs a concrete post to act on
    pub fn takes_target(self) -> bool {
        matches!(
            self,
            Intent::ReactToPost
                | Intent::Share
                | Intent::SavePost
                | Intent::HidePost
                | Intent::DeletePost
                | Intent::CopyLink
                | Intent::ReportPost
                | Intent::AddCommentText
                | Intent::OpenPostViewer
                | Intent::Comment
                | Intent::ViewComments
        )
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Intent {
    fn from(name: String) -> Self {
        Intent::from_name(&name)
    }
}

impl From<Intent> for String {
    fn from(intent: Intent) -> Self {
        intent.name().to_string()
    }
}
