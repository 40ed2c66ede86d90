//! A user session against the in-memory feed screen

mod common;

use common::*;
use std::sync::Arc;
use voicebook::core::error::VoiceError;
use voicebook::core::types::{EntityId, Language};
use voicebook::host::feed::Post;
use voicebook::host::{ComposerMode, ScrollState, View};
use voicebook::intent::{ReactionType, ResolutionSource, Slots};
use voicebook::llm::OfflineNlu;
use voicebook::{CommandPipeline, FeedScreen, Host, Intent, PipelineConfig, Resolution};

fn screen() -> FeedScreen {
    FeedScreen::new(
        "u-me",
        vec![
            Post::new("p1", "Shojib Khan", "u-shojib", "Sunset"),
            Post::new("p2", "Prithibi", "u-prithibi", "New song"),
            Post::sponsored("ad1", "Acme Tea", "Drink tea"),
            Post::new("p3", "Maria", "u-maria", "Marathon"),
            Post::new("p4", "You", "u-me", "Testing"),
        ],
    )
}

fn offline() -> CommandPipeline {
    CommandPipeline::new(test_config(), Arc::new(OfflineNlu)).unwrap()
}

#[tokio::test]
async fn test_browse_react_and_save() {
    let pipeline = offline();
    let mut s = screen();

    pipeline.resolve_and_dispatch("next post", &mut s).await;
    assert_eq!(s.focused_post().unwrap().id, EntityId::from("p1"));
    assert!(s.playing);

    pipeline.resolve_and_dispatch("next", &mut s).await;
    pipeline.resolve_and_dispatch("love this", &mut s).await;
    assert_eq!(s.reactions.get(&EntityId::from("p2")), Some(&ReactionType::Love));
    assert_eq!(s.last_message(), Some("Reacted with ❤️ to Prithibi's post."));

    pipeline.resolve_and_dispatch("save this post", &mut s).await;
    assert!(s.saved.contains(&EntityId::from("p2")));
    pipeline.resolve_and_dispatch("unsave", &mut s).await;
    assert!(!s.saved.contains(&EntityId::from("p2")));

    pipeline.resolve_and_dispatch("pause", &mut s).await;
    assert!(!s.playing);

    assert_eq!(s.processed_count(), 6);
}

#[tokio::test]
async fn test_previous_wraps_to_last() {
    let pipeline = offline();
    let mut s = screen();

    pipeline.resolve_and_dispatch("previous post", &mut s).await;

    assert_eq!(s.focused_post().unwrap().id, EntityId::from("p4"));
}

#[tokio::test]
async fn test_named_reaction_ignores_focus() {
    let pipeline = offline();
    let mut s = screen();
    s.focus_index(0);

    pipeline.resolve_and_dispatch("haha Maria's post", &mut s).await;

    assert_eq!(s.reactions.get(&EntityId::from("p3")), Some(&ReactionType::Haha));
    assert!(!s.reactions.contains_key(&EntityId::from("p1")));
}

#[tokio::test]
async fn test_hidden_post_leaves_focus_context() {
    let pipeline = offline();
    let mut s = screen();
    s.focus_index(3);

    pipeline.resolve_and_dispatch("hide this post", &mut s).await;
    assert!(s.hidden.contains(&EntityId::from("p3")));
    assert!(s
        .focus_context()
        .visible
        .iter()
        .all(|e| e.id != EntityId::from("p3")));

    pipeline.resolve_and_dispatch("like Maria's post", &mut s).await;
    assert_eq!(
        s.last_message(),
        Some("Couldn't find a post by Maria on your screen.")
    );
}

#[tokio::test]
async fn test_delete_only_own_post() {
    let pipeline = offline();
    let mut s = screen();

    s.focus_index(0);
    pipeline.resolve_and_dispatch("delete this post", &mut s).await;
    assert_eq!(s.visible_posts().len(), 5);

    s.focus_index(4);
    pipeline.resolve_and_dispatch("delete post", &mut s).await;
    assert!(s.post(&EntityId::from("p4")).is_none());
    assert_eq!(s.visible_posts().len(), 4);
}

#[tokio::test]
async fn test_navigation_and_composer() {
    let pipeline = offline();
    let mut s = screen();

    pipeline.resolve_and_dispatch("open Shojib Khan's profile", &mut s).await;
    assert_eq!(
        s.view,
        View::Profile {
            name: Some("Shojib Khan".into()),
            initial_tab: None
        }
    );
    assert_eq!(s.last_message(), Some("Opening profile for Shojib Khan."));

    pipeline.resolve_and_dispatch("open my profile", &mut s).await;
    assert_eq!(
        s.view,
        View::Profile {
            name: None,
            initial_tab: None
        }
    );

    pipeline.resolve_and_dispatch("show friend requests", &mut s).await;
    assert_eq!(
        s.view,
        View::Friends {
            initial_tab: Some("requests".into())
        }
    );

    pipeline.resolve_and_dispatch("scroll down", &mut s).await;
    assert_eq!(s.scroll, ScrollState::Down);
    pipeline.resolve_and_dispatch("stop scroll", &mut s).await;
    assert_eq!(s.scroll, ScrollState::None);

    pipeline
        .resolve_and_dispatch("generate an image of a tiger in Dhaka", &mut s)
        .await;
    assert_eq!(
        s.composer,
        Some(ComposerMode::Image {
            prompt: "a tiger in Dhaka".into()
        })
    );

    pipeline.resolve_and_dispatch("chat with Maria", &mut s).await;
    assert_eq!(s.view, View::Conversation { with: "Maria".into() });
}

#[tokio::test]
async fn test_reload_and_help_are_announced() {
    let pipeline = offline();
    let mut s = screen();

    pipeline.resolve_and_dispatch("refresh", &mut s).await;
    assert_eq!(s.reloads, 1);
    assert_eq!(s.last_message(), Some("Reloading your feed..."));

    pipeline.resolve_and_dispatch("help", &mut s).await;
    assert_eq!(s.view, View::Help);
    assert_eq!(s.last_message(), Some("Opening the command list."));
}

#[tokio::test]
async fn test_demonstrative_profile_opens_focused_author() {
    let pipeline = offline();
    let mut s = screen();
    s.focus_index(3);

    pipeline.resolve_and_dispatch("open this profile", &mut s).await;

    assert_eq!(
        s.view,
        View::Profile {
            name: Some("Maria".into()),
            initial_tab: None
        }
    );
    assert_eq!(s.last_message(), Some("Opening profile for Maria."));
}

#[tokio::test]
async fn test_demonstrative_profile_without_focus_asks_for_one() {
    let pipeline = offline();
    let mut s = screen();

    pipeline.resolve_and_dispatch("show that profile", &mut s).await;

    assert_eq!(s.view, View::Feed);
    assert_eq!(
        s.last_message(),
        Some("Sorry, I couldn't figure out which post you meant. Please scroll to a post first.")
    );
}

#[tokio::test]
async fn test_chat_with_focused_author() {
    let pipeline = offline();
    let mut s = screen();
    s.focus_index(1);

    pipeline.resolve_and_dispatch("chat with this", &mut s).await;

    assert_eq!(s.view, View::Conversation { with: "Prithibi".into() });
}

#[tokio::test]
async fn test_comment_draft_opens_sheet() {
    let pipeline = offline();
    let mut s = screen();
    s.focus_index(1);

    pipeline
        .resolve_and_dispatch("comment Darun gaan!", &mut s)
        .await;

    assert_eq!(
        s.comment_sheet,
        Some((EntityId::from("p2"), Some("Darun gaan!".into())))
    );
}

#[tokio::test]
async fn test_bengali_feedback() {
    let config = PipelineConfig {
        language: Language::Bn,
        ..test_config()
    };
    let pipeline = CommandPipeline::new(config, Arc::new(OfflineNlu)).unwrap();
    let mut s = screen();

    // Nothing focused yet
    pipeline.resolve_and_dispatch("share koro", &mut s).await;
    assert_eq!(
        s.last_message(),
        Some("দুঃখিত, কোন পোস্টের কথা বলছেন বুঝতে পারিনি। আগে একটি পোস্টে যান।")
    );
    assert!(s.shared.is_empty());

    pipeline.resolve_and_dispatch("reload koro", &mut s).await;
    assert_eq!(s.last_message(), Some("আপনার ফিড রিলোড হচ্ছে..."));

    pipeline.resolve_and_dispatch("kichu ekta", &mut s).await;
    assert_eq!(s.last_message(), Some("দুঃখিত, আমি বুঝতে পারিনি। আবার চেষ্টা করুন।"));
}

#[tokio::test]
async fn test_remote_chain_uses_snapshot_taken_before_steps() {
    let chain = Resolution::chain(
        vec![
            Resolution::bare(Intent::NextPost, ResolutionSource::Remote),
            Resolution::new(
                Intent::ReactToPost,
                Slots::contextual().with_reaction(ReactionType::Wow),
                ResolutionSource::Remote,
            ),
        ],
        ResolutionSource::Remote,
    );
    let pipeline = pipeline_with(StubNlu::new(chain));
    let mut s = screen();
    s.focus_index(0);

    pipeline
        .resolve_and_dispatch("go to the next one and wow it", &mut s)
        .await;

    // Focus moved, but the reaction went to the post focused when the chain began
    assert_eq!(s.focused_post().unwrap().id, EntityId::from("p2"));
    assert_eq!(s.reactions.get(&EntityId::from("p1")), Some(&ReactionType::Wow));
    assert!(s.reactions.get(&EntityId::from("p2")).is_none());
}

#[tokio::test]
async fn test_extra_phrases_from_file() {
    let path = std::env::temp_dir().join(format!("voicebook-phrases-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
[[phrase]]
text = "boost it"
intent = "intent_share"
slots = { is_contextual = true }
"#,
    )
    .unwrap();

    let config = PipelineConfig {
        phrases_file: Some(path.clone()),
        ..test_config()
    };
    let pipeline = CommandPipeline::new(config, Arc::new(OfflineNlu)).unwrap();
    let mut s = screen();
    s.focus_index(3);

    pipeline.resolve_and_dispatch("Boost it", &mut s).await;
    std::fs::remove_file(&path).ok();

    assert_eq!(s.shared, vec![EntityId::from("p3")]);
}

#[test]
fn test_phrase_file_with_empty_chain_is_rejected() {
    let path = std::env::temp_dir().join(format!("voicebook-bad-phrases-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
[[phrase]]
text = "do both"
intent = "intent_chained_command"
"#,
    )
    .unwrap();

    let config = PipelineConfig {
        phrases_file: Some(path.clone()),
        ..test_config()
    };
    let result = CommandPipeline::new(config, Arc::new(OfflineNlu));
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(VoiceError::ConfigError(_))));
}

#[tokio::test]
async fn test_teardown_of_feed_screen() {
    let pipeline = pipeline_with(StubNlu::new(Resolution::new(
        Intent::Share,
        Slots::contextual(),
        ResolutionSource::Remote,
    )));
    let mut s = screen();
    s.focus_index(0);
    s.tear_down();

    pipeline.resolve_and_dispatch("spread the word", &mut s).await;

    assert!(s.shared.is_empty());
    assert_eq!(s.processed_count(), 1);
}
