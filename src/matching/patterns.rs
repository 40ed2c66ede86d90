//! Ordered regex rules for commands that carry a parameter
//!
//! Second resolution stage. Rules are tried in the order they are authored
//! and the first match wins, so broad rules must stay below the specific
//! ones they would otherwise shadow. Matching is case-insensitive against
//! the trimmed raw transcript, so names and free text keep their casing.

use crate::core::error::Result;
use crate::intent::{Intent, ReactionType, Resolution, ResolutionSource, Slots};
use regex::{Captures, Regex};

/// Builds intent and slots from a rule's captures
type Extractor = fn(&Captures) -> (Intent, Slots);

/// One (regex, extractor) pair
pub struct PatternRule {
    pub name: &'static str,
    regex: Regex,
    extract: Extractor,
}

impl PatternRule {
    pub fn new(name: &'static str, pattern: &str, extract: Extractor) -> Result<Self> {
        Ok(Self {
            name,
            regex: Regex::new(pattern)?,
            extract,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl std::fmt::Debug for PatternRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternRule")
            .field("name", &self.name)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}

/// Pure, deterministic first-match-wins matcher
#[derive(Debug)]
pub struct PatternMatcher {
    rules: Vec<PatternRule>,
}

impl PatternMatcher {
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    /// The built-in rule list, in precedence order
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(vec![
            PatternRule::new(
                "open_profile",
                r"(?i)^(?:open|show|dekhao)\s+(.+?)(?:'s| er)?\s+profile$",
                |caps| (Intent::OpenProfile, name_slots(capture(caps, 1))),
            )?,
            PatternRule::new(
                "search_user",
                r"(?i)^(?:search for|search|khojo)\s+(.+)$",
                |caps| (Intent::SearchUser, name_slots(capture(caps, 1))),
            )?,
            PatternRule::new(
                "add_comment_text",
                r"(?i)^(?:comment on this post|comment|comment koro)\s+(.+)$",
                |caps| {
                    (
                        Intent::AddCommentText,
                        Slots::contextual().with_comment_text(capture(caps, 1)),
                    )
                },
            )?,
            PatternRule::new(
                "generate_image",
                r"(?i)^(?:generate an image of|generate image|image of|chobi banao)\s+(.+)$",
                |caps| (Intent::GenerateImage, Slots::default().with_prompt(capture(caps, 1))),
            )?,
            PatternRule::new(
                "react_to_named_post",
                r"(?i)^(like|love|haha|wow|sad|angry)\s+(.+?)(?:'s)?\s+post$",
                |caps| {
                    let reaction = ReactionType::parse(capture(caps, 1));
                    (
                        Intent::ReactToPost,
                        name_slots(capture(caps, 2)).with_reaction(reaction),
                    )
                },
            )?,
            PatternRule::new(
                "open_chat",
                r"(?i)^(?:open chat with|start chat with|chat with)\s+(.+)$",
                |caps| (Intent::OpenChat, name_slots(capture(caps, 1))),
            )?,
            PatternRule::new(
                "add_friend",
                r"(?i)^(?:add|friend)\s+(.+?)(?:\s+as friend)?$",
                |caps| (Intent::AddFriend, name_slots(capture(caps, 1))),
            )?,
        ]))
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Resolve `text` with the first matching rule
    pub fn match_command(&self, text: &str) -> Option<Resolution> {
        self.match_with_rule(text).map(|(_, resolution)| resolution)
    }

    /// Like `match_command`, also returning the index of the winning rule
    pub fn match_with_rule(&self, text: &str) -> Option<(usize, Resolution)> {
        let text = text.trim();
        self.rules.iter().enumerate().find_map(|(index, rule)| {
            rule.regex.captures(text).map(|caps| {
                tracing::debug!(rule = rule.name, "pattern matched");
                let (intent, slots) = (rule.extract)(&caps);
                (index, Resolution::new(intent, slots, ResolutionSource::Pattern))
            })
        })
    }
}

fn capture<'t>(caps: &Captures<'t>, group: usize) -> &'t str {
    caps.get(group).map(|m| m.as_str().trim()).unwrap_or("")
}

/// Slots for a captured name.
///
/// Self references resolve to the bare intent; demonstratives ("this post")
/// mean the focused entity. Anything else is an explicit target.
fn name_slots(name: &str) -> Slots {
    let lowered = name.to_lowercase();
    match lowered.as_str() {
        "my" | "amar" | "আমার" => Slots::default(),
        "this" | "that" | "ei" | "oi" | "এই" => Slots::contextual(),
        _ => Slots::targeted(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> PatternMatcher {
        PatternMatcher::builtin().unwrap()
    }

    #[test]
    fn test_open_profile_keeps_casing() {
        let resolution = matcher().match_command("Open Shojib Khan's profile").unwrap();
        assert_eq!(resolution.intent, Intent::OpenProfile);
        assert_eq!(resolution.slots.target_name(), Some("Shojib Khan"));
        assert_eq!(resolution.source, ResolutionSource::Pattern);
    }

    #[test]
    fn test_banglish_profile() {
        let resolution = matcher().match_command("dekhao prithibi er profile").unwrap();
        assert_eq!(resolution.slots.target_name(), Some("prithibi"));
    }

    #[test]
    fn test_self_reference_is_bare() {
        let resolution = matcher().match_command("show amar profile").unwrap();
        assert_eq!(resolution.intent, Intent::OpenProfile);
        assert!(resolution.slots.is_empty());
    }

    #[test]
    fn test_reaction_is_normalized_name_is_not() {
        let resolution = matcher().match_command("LOVE Maria's post").unwrap();
        assert_eq!(resolution.intent, Intent::ReactToPost);
        assert_eq!(resolution.slots.reaction_type, Some(ReactionType::Love));
        assert_eq!(resolution.slots.target_name(), Some("Maria"));
        assert!(!resolution.slots.is_contextual());
    }

    #[test]
    fn test_demonstrative_is_contextual() {
        let resolution = matcher().match_command("wow this post").unwrap();
        assert!(resolution.slots.is_contextual());
        assert_eq!(resolution.slots.target_name(), None);
    }

    #[test]
    fn test_people_rules_share_name_handling() {
        let m = matcher();
        let chat = m.match_command("chat with this").unwrap();
        assert_eq!(chat.intent, Intent::OpenChat);
        assert!(chat.slots.is_contextual());
        assert_eq!(chat.slots.target_name(), None);

        let search = m.match_command("search Rafi Ahmed").unwrap();
        assert_eq!(search.slots.target_name(), Some("Rafi Ahmed"));

        let friend = m.match_command("add that as friend").unwrap();
        assert_eq!(friend.intent, Intent::AddFriend);
        assert!(friend.slots.is_contextual());
    }

    #[test]
    fn test_comment_text_is_trimmed() {
        let resolution = matcher()
            .match_command("comment on this post   Khub Sundor  ")
            .unwrap();
        assert_eq!(resolution.intent, Intent::AddCommentText);
        assert_eq!(resolution.slots.comment_text.as_deref(), Some("Khub Sundor"));
        assert!(resolution.slots.is_contextual());
    }

    #[test]
    fn test_generate_image_prompt() {
        let resolution = matcher()
            .match_command("generate an image of a Red Car")
            .unwrap();
        assert_eq!(resolution.intent, Intent::GenerateImage);
        assert_eq!(resolution.slots.prompt.as_deref(), Some("a Red Car"));
    }

    #[test]
    fn test_add_friend_strips_suffix() {
        let resolution = matcher().match_command("add Maria as friend").unwrap();
        assert_eq!(resolution.intent, Intent::AddFriend);
        assert_eq!(resolution.slots.target_name(), Some("Maria"));
    }

    #[test]
    fn test_earlier_rule_shadows_later() {
        // Both the profile rule (0) and the chat rule (5) match this text.
        let m = matcher();
        let text = "open chat with Bob profile";
        assert!(m.rules()[5].is_match(text));
        let (index, resolution) = m.match_with_rule(text).unwrap();
        assert_eq!(index, 0);
        assert_eq!(resolution.intent, Intent::OpenProfile);
    }

    #[test]
    fn test_no_match() {
        assert!(matcher().match_command("what's the weather").is_none());
    }

    #[test]
    fn test_rule_order_is_stable() {
        let names: Vec<_> = matcher().rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "open_profile",
                "search_user",
                "add_comment_text",
                "generate_image",
                "react_to_named_post",
                "open_chat",
                "add_friend",
            ]
        );
    }
}
