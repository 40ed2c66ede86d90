//! VoiceBook - Entry Point
//!
//! Interactive console over a demo feed. Each line is treated as one
//! transcribed utterance and run through the command pipeline.

use voicebook::core::error::Result;
use voicebook::core::types::Language;
use voicebook::host::feed::Post;
use voicebook::llm::{LlmNlu, NluBackend, OfflineNlu};
use voicebook::{CommandPipeline, FeedScreen, Outcome, PipelineConfig};

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Type voice commands against a demo feed
#[derive(Parser, Debug)]
#[command(name = "voicebook")]
#[command(about = "Resolve voice commands against a demo feed")]
struct Args {
    /// Pipeline configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reply language: en or bn
    #[arg(long)]
    language: Option<Language>,

    /// Never call the remote model
    #[arg(long)]
    offline: bool,

    /// Extra exact-match phrases (TOML)
    #[arg(long)]
    phrases: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("voicebook=info")),
        )
        .init();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::load_toml(path)?.with_env_overrides()?,
        None => PipelineConfig::from_env()?,
    };
    if let Some(language) = args.language {
        config.language = language;
    }
    if let Some(phrases) = args.phrases {
        config.phrases_file = Some(phrases);
    }

    let backend = select_backend(args.offline, config.llm_max_tokens);
    tracing::info!(backend = backend.name(), timeout_ms = config.nlu_timeout_ms, "VoiceBook starting...");

    let pipeline = CommandPipeline::new(config, backend)?;
    let rt = Runtime::new()?;
    let mut screen = demo_screen();

    println!("\n=== VOICEBOOK ===");
    println!("Type what you would say. Examples: \"next post\", \"like this post\",");
    println!("\"love Maria's post\", \"open Shojib's profile\".");
    println!();
    println!("Commands:");
    println!("  posts           - List the feed");
    println!("  focus <n>       - Focus post n");
    println!("  quit / q        - Exit");
    println!();

    loop {
        display_status(&screen);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "posts" {
            list_posts(&screen);
            continue;
        }

        if let Some(rest) = input.strip_prefix("focus ") {
            match rest.trim().parse::<usize>() {
                Ok(n) if n >= 1 && n <= screen.visible_posts().len() => screen.focus_index(n - 1),
                _ => println!("No post {}", rest.trim()),
            }
            continue;
        }

        let outcome = rt.block_on(pipeline.resolve_and_dispatch(input, &mut screen));
        if let Outcome::Dispatched { resolution, report } = &outcome {
            println!("[{} via {:?}]", resolution.intent, resolution.source);
            for action in &report.dispatched {
                println!("  -> {:?}", action);
            }
        }
        for message in screen.drain_messages() {
            println!("{}", message);
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn select_backend(offline: bool, max_tokens: u32) -> Arc<dyn NluBackend> {
    if offline {
        return Arc::new(OfflineNlu);
    }
    match LlmNlu::from_env(max_tokens) {
        Ok(nlu) => Arc::new(nlu),
        Err(e) => {
            tracing::warn!(error = %e, "running without remote NLU");
            Arc::new(OfflineNlu)
        }
    }
}

fn demo_screen() -> FeedScreen {
    FeedScreen::new(
        "u-me",
        vec![
            Post::new("p1", "Shojib Khan", "u-shojib", "Sunset at Cox's Bazar"),
            Post::new("p2", "Prithibi", "u-prithibi", "New song out today!"),
            Post::sponsored("ad1", "Acme Tea", "Start your morning right"),
            Post::new("p3", "Maria", "u-maria", "Finished my first marathon"),
            Post::new("p4", "You", "u-me", "Testing voice posts"),
        ],
    )
    .with_friends(vec!["Rafi Ahmed".into(), "Nusrat".into()])
}

fn display_status(screen: &FeedScreen) {
    let focused = screen
        .focused_post()
        .map(|p| format!("{} ({})", p.author_name, p.id))
        .unwrap_or_else(|| "nothing".into());
    println!(
        "\n--- {:?} | focus: {} | playing: {} | scroll: {:?} ---",
        screen.view, focused, screen.playing, screen.scroll
    );
}

fn list_posts(screen: &FeedScreen) {
    let focused = screen.focused_post().map(|p| p.id.clone());
    for (i, post) in screen.visible_posts().iter().enumerate() {
        let marker = if Some(&post.id) == focused.as_ref() { '*' } else { ' ' };
        let reaction = screen
            .reactions
            .get(&post.id)
            .map(|r| r.emoji())
            .unwrap_or("");
        let saved = if screen.saved.contains(&post.id) { " [saved]" } else { "" };
        println!(
            "{} {}. {}: {} {}{}",
            marker,
            i + 1,
            post.author_name,
            post.text,
            reaction,
            saved
        );
    }
}
