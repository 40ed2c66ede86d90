//! Exact-phrase intent table
//!
//! First stage of resolution: a hash lookup of the normalized utterance.
//! No partial or fuzzy matching happens here. Synonyms across English,
//! Banglish and Bengali script are just more keys.

use crate::core::error::{Result, VoiceError};
use crate::intent::{normalize, Intent, ReactionType, Resolution, ResolutionSource, SaveAction, Slots};
use ahash::AHashMap;
use serde::Deserialize;

/// Exact-match phrase table
#[derive(Debug, Clone, Default)]
pub struct IntentTable {
    entries: AHashMap<String, (Intent, Slots)>,
}

impl IntentTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in phrase set
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (phrase, intent, slots) in builtin_entries() {
            table.insert(phrase, intent, slots);
        }
        table
    }

    /// Add or replace a phrase. The key is normalized like a command.
    pub fn insert(&mut self, phrase: &str, intent: Intent, slots: Slots) {
        self.entries.insert(normalize(phrase), (intent, slots));
    }

    /// Look up an already-normalized utterance
    pub fn lookup(&self, normalized: &str) -> Option<Resolution> {
        self.entries
            .get(normalized)
            .map(|(intent, slots)| {
                Resolution::new(*intent, slots.clone(), ResolutionSource::Exact)
                    .with_source(ResolutionSource::Exact)
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge phrases from a TOML document; they override built-ins on collision.
    ///
    /// Every entry is checked before any is inserted, so a rejected file
    /// leaves the table as it was.
    pub fn extend_from_toml(&mut self, content: &str) -> Result<usize> {
        let file: PhraseFile = toml::from_str(content)?;
        let entries = file
            .phrase
            .into_iter()
            .map(PhraseEntry::into_resolution)
            .collect::<Result<Vec<_>>>()?;

        let count = entries.len();
        for (text, resolution) in entries {
            self.insert(&text, resolution.intent, resolution.slots);
        }
        Ok(count)
    }

    /// Load extra phrases from a TOML file
    pub fn extend_from_file(&mut self, path: &std::path::Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)?;
        self.extend_from_toml(&content)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PhraseFile {
    #[serde(default)]
    phrase: Vec<PhraseEntry>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PhraseEntry {
    text: String,
    intent: String,
    #[serde(default)]
    slots: Slots,
}

impl PhraseEntry {
    fn into_resolution(self) -> Result<(String, Resolution)> {
        let intent = Intent::from_name(&self.intent);
        if intent == Intent::Unknown && self.intent.trim() != Intent::Unknown.name() {
            return Err(VoiceError::ConfigError(format!(
                "phrase '{}' maps to unrecognised intent '{}'",
                self.text, self.intent
            )));
        }
        let resolution = Resolution::new(intent, self.slots, ResolutionSource::Exact);
        if let Some(reason) = resolution.shape_error() {
            return Err(VoiceError::ConfigError(format!("phrase '{}': {}", self.text, reason)));
        }
        Ok((self.text, resolution))
    }
}

fn react(reaction: ReactionType) -> Slots {
    Slots::contextual().with_reaction(reaction)
}

fn builtin_entries() -> Vec<(&'static str, Intent, Slots)> {
    use Intent::*;
    let none = Slots::default;
    let ctx = Slots::contextual;

    vec![
        // Navigation
        ("go to my feed", OpenFeed, none()),
        ("open feed", OpenFeed, none()),
        ("show my feed", OpenFeed, none()),
        ("home page e jao", OpenFeed, none()),
        ("amar feed dekhao", OpenFeed, none()),
        ("news feed", OpenFeed, none()),
        ("প্রথম পাতা", OpenFeed, none()),
        ("হোম পেজে যাও", OpenFeed, none()),
        ("open explore", OpenExplore, none()),
        ("explore page", OpenExplore, none()),
        ("explore koro", OpenExplore, none()),
        ("এক্সপ্লোর", OpenExplore, none()),
        ("open reels", OpenReels, none()),
        ("show reels", OpenReels, none()),
        ("reels dekhao", OpenReels, none()),
        ("রিলস দেখাও", OpenReels, none()),
        ("show my profile", OpenProfile, none()),
        ("open my profile", OpenProfile, none()),
        ("amar profile", OpenProfile, none()),
        ("আমার প্রোফাইল", OpenProfile, none()),
        ("open messages", OpenMessages, none()),
        ("show messages", OpenMessages, none()),
        ("message dekhao", OpenMessages, none()),
        ("inbox e jao", OpenMessages, none()),
        ("মেসেজ দেখাও", OpenMessages, none()),
        ("open groups", OpenGroupsHub, none()),
        ("show groups", OpenGroupsHub, none()),
        ("group page", OpenGroupsHub, none()),
        ("গ্রুপ পেজ", OpenGroupsHub, none()),
        ("open rooms", OpenRoomsHub, none()),
        ("show rooms", OpenRoomsHub, none()),
        ("room page", OpenRoomsHub, none()),
        ("রুম পেজ", OpenRoomsHub, none()),
        ("show my saved posts", OpenProfile, none().with_initial_tab("saved")),
        ("amar saved post", OpenProfile, none().with_initial_tab("saved")),
        ("সেভ করা পোস্ট", OpenProfile, none().with_initial_tab("saved")),
        ("go back", GoBack, none()),
        ("back", GoBack, none()),
        ("phire jao", GoBack, none()),
        ("ফিরে যাও", GoBack, none()),
        ("আগের পেজে যান", GoBack, none()),
        ("reload page", ReloadPage, none()),
        ("reload", ReloadPage, none()),
        ("refresh", ReloadPage, none()),
        ("reload koro", ReloadPage, none()),
        ("রিলোড কর", ReloadPage, none()),
        ("help", Help, none()),
        ("ki ki command ache", Help, none()),
        ("সাহায্য", Help, none()),
        // Feed interaction
        ("play post", PlayPost, ctx()),
        ("play", PlayPost, ctx()),
        ("play koro", PlayPost, ctx()),
        ("প্লে কর", PlayPost, ctx()),
        ("pause post", PausePost, ctx()),
        ("pause", PausePost, ctx()),
        ("pause koro", PausePost, ctx()),
        ("পজ কর", PausePost, ctx()),
        ("next post", NextPost, none()),
        ("next", NextPost, none()),
        ("porer post", NextPost, none()),
        ("পরের পোস্টে যাও", NextPost, none()),
        ("previous post", PreviousPost, none()),
        ("previous", PreviousPost, none()),
        ("ager post", PreviousPost, none()),
        ("আগের পোস্টে যাও", PreviousPost, none()),
        ("scroll down", ScrollDown, none()),
        ("niche jao", ScrollDown, none()),
        ("নিচে যাও", ScrollDown, none()),
        ("scroll up", ScrollUp, none()),
        ("upore jao", ScrollUp, none()),
        ("উপরে যাও", ScrollUp, none()),
        ("stop scroll", StopScroll, none()),
        ("thamo", StopScroll, none()),
        ("থামো", StopScroll, none()),
        ("like", ReactToPost, react(ReactionType::Like)),
        ("like this", ReactToPost, react(ReactionType::Like)),
        ("like this post", ReactToPost, react(ReactionType::Like)),
        ("like koro", ReactToPost, react(ReactionType::Like)),
        ("love", ReactToPost, react(ReactionType::Love)),
        ("love this", ReactToPost, react(ReactionType::Love)),
        ("love dao", ReactToPost, react(ReactionType::Love)),
        ("bhalobasha dilam", ReactToPost, react(ReactionType::Love)),
        ("haha", ReactToPost, react(ReactionType::Haha)),
        ("hashi", ReactToPost, react(ReactionType::Haha)),
        ("sad", ReactToPost, react(ReactionType::Sad)),
        ("kanna", ReactToPost, react(ReactionType::Sad)),
        ("wow", ReactToPost, react(ReactionType::Wow)),
        ("angry", ReactToPost, react(ReactionType::Angry)),
        ("raag", ReactToPost, react(ReactionType::Angry)),
        ("open comments", ViewComments, ctx()),
        ("view comments", ViewComments, ctx()),
        ("comment dekhao", ViewComments, ctx()),
        ("কমেন্টগুলো দেখাও", ViewComments, ctx()),
        ("open this post", OpenPostViewer, ctx()),
        ("post ta kholo", OpenPostViewer, ctx()),
        ("পোস্ট-টি খোল", OpenPostViewer, ctx()),
        ("share this post", Share, ctx()),
        ("share", Share, ctx()),
        ("share koro", Share, ctx()),
        ("শেয়ার কর", Share, ctx()),
        ("save this post", SavePost, ctx().with_action(SaveAction::Save)),
        ("save", SavePost, ctx().with_action(SaveAction::Save)),
        ("post save koro", SavePost, ctx().with_action(SaveAction::Save)),
        ("পোস্ট সেভ কর", SavePost, ctx().with_action(SaveAction::Save)),
        ("unsave this post", SavePost, ctx().with_action(SaveAction::Unsave)),
        ("unsave", SavePost, ctx().with_action(SaveAction::Unsave)),
        ("post unsave koro", SavePost, ctx().with_action(SaveAction::Unsave)),
        ("আনসেভ কর", SavePost, ctx().with_action(SaveAction::Unsave)),
        ("hide this post", HidePost, ctx()),
        ("hide post", HidePost, ctx()),
        ("post lukao", HidePost, ctx()),
        ("পোস্ট লুকাও", HidePost, ctx()),
        ("copy link", CopyLink, ctx()),
        ("link copy koro", CopyLink, ctx()),
        ("লিঙ্ক কপি কর", CopyLink, ctx()),
        ("report post", ReportPost, ctx()),
        ("report this post", ReportPost, ctx()),
        ("report koro", ReportPost, ctx()),
        ("রিপোর্ট কর", ReportPost, ctx()),
        ("delete this post", DeletePost, ctx()),
        ("delete post", DeletePost, ctx()),
        ("post delete koro", DeletePost, ctx()),
        ("পোস্ট ডিলিট কর", DeletePost, ctx()),
        // Content creation
        ("create a new post", CreatePost, none()),
        ("create post", CreatePost, none()),
        ("notun post", CreatePost, none()),
        ("নতুন পোস্ট", CreatePost, none()),
        ("start a voice post", CreateVoicePost, none()),
        ("create voice post", CreateVoicePost, none()),
        ("voice post", CreateVoicePost, none()),
        ("ভয়েস পোস্ট", CreateVoicePost, none()),
        ("create a poll", CreatePoll, none()),
        ("create poll", CreatePoll, none()),
        // Friends
        ("show my friends", OpenFriendsPage, none()),
        ("amar bondhuder dekhao", OpenFriendsPage, none()),
        ("আমার বন্ধুদের দেখাও", OpenFriendsPage, none()),
        ("show friend requests", OpenFriendsPage, none().with_initial_tab("requests")),
        // Settings
        ("open settings", OpenSettings, none()),
        ("settings e jao", OpenSettings, none()),
        ("সেটিংসে যাও", OpenSettings, none()),
        ("save settings", SaveSettings, none()),
    ]
}
