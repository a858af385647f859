//! # Helpbot Interactive Chat
//!
//! File: cli/src/commands/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements `helpbot chat`, an interactive conversation in the
//! terminal. Every line read from stdin is submitted to a `ResponsePipeline`
//! backed by a `TerminalPort`, so replies appear after the thinking delay while
//! a spinner shows the bot is typing. Input is never blocked: you can keep
//! typing while earlier replies are still composing.
//!
//! Lines starting with `/` are session commands:
//! - `/1` .. `/N`: send the N-th example query (quick reply)
//! - `/help`: list commands and quick replies
//! - `/quit` or `/exit`: leave the session
//!
//! End of input (Ctrl+D, or the end of a piped file) also ends the session.
//! Either way, replies already scheduled are printed before the command exits.
//!
//! ## Examples
//!
//! ```bash
//! # Start a session with the configured delay
//! helpbot chat
//!
//! # Replay a script of questions without the delay
//! printf 'join group\nmessage someone\n' | helpbot chat --delay-ms 0 --quiet
//! ```
//!
use super::ResponderArgs;
use crate::bot::pipeline::{PendingReply, ResponsePipeline};
use crate::bot::render::TerminalPort;
use crate::bot::responder::Responder;
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{debug, info};

/// # Chat Command Arguments (`ChatArgs`)
#[derive(Parser, Debug)]
pub struct ChatArgs {
    #[command(flatten)]
    pub responder: ResponderArgs,

    /// Skip the greeting and the list of quick replies.
    #[arg(long, short)]
    pub quiet: bool,
}

/// One line of REPL input, classified.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Text(String),
    QuickReply(usize),
    Help,
    Quit,
    Unknown(String),
}

fn parse_line(raw: &str) -> Line {
    let trimmed = raw.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return Line::Text(raw.to_string());
    };
    match command.to_lowercase().as_str() {
        "help" | "?" => Line::Help,
        "quit" | "exit" | "q" => Line::Quit,
        other => match other.parse::<usize>() {
            Ok(number) => Line::QuickReply(number),
            Err(_) => Line::Unknown(trimmed.to_string()),
        },
    }
}

fn print_greeting(suggestions: &[String]) {
    println!("👋 Hi! I'm the research platform helper. Ask me anything about using the site.");
    print_quick_replies(suggestions);
    println!("Type /help for commands, /quit to leave.\n");
}

fn print_help(suggestions: &[String]) {
    println!("Commands:");
    if !suggestions.is_empty() {
        println!("  /1../{}     send a quick reply", suggestions.len());
    }
    println!("  /help      show this list");
    println!("  /quit      leave the session (also /exit or Ctrl+D)");
    print_quick_replies(suggestions);
    println!();
}

fn print_quick_replies(suggestions: &[String]) {
    if suggestions.is_empty() {
        return;
    }
    println!("Quick replies:");
    for (i, query) in suggestions.iter().enumerate() {
        println!("  /{}  {}", i + 1, query);
    }
}

/// Replies scheduled during the session that have not been printed yet.
/// Finished ones are reaped as the session goes on.
struct ReplyTracker {
    replies: JoinSet<Result<()>>,
}

impl ReplyTracker {
    fn new() -> Self {
        Self {
            replies: JoinSet::new(),
        }
    }

    fn track(&mut self, reply: Option<PendingReply>) {
        if let Some(reply) = reply {
            self.replies.spawn(async move { reply.wait().await.map(|_| ()) });
        }
    }

    /// Drops every finished reply, surfacing the first failure.
    fn reap(&mut self) -> Result<()> {
        while let Some(joined) = self.replies.try_join_next() {
            joined.context("Reply task failed")??;
        }
        Ok(())
    }

    fn outstanding(&self) -> usize {
        self.replies.len()
    }

    /// Waits for every reply still in flight.
    async fn finish(mut self) -> Result<()> {
        while let Some(joined) = self.replies.join_next().await {
            joined.context("Reply task failed")??;
        }
        Ok(())
    }
}

/// # Handle Chat Command (`handle_chat`)
///
/// Loads configuration, builds the pipeline and runs the read loop until
/// `/quit` or end of input. Returns once every scheduled reply has been printed.
///
/// ## Errors
///
/// Returns an error if configuration or the knowledge base fails to load, or if
/// stdin cannot be read. An out-of-range quick reply is reported and the
/// session continues.
pub async fn handle_chat(args: ChatArgs, config_path: Option<&Path>) -> Result<()> {
    let cfg = config::load_config(config_path, &args.responder.overrides())?;
    let responder = Arc::new(Responder::from_config(&cfg)?);
    let port = Arc::new(TerminalPort::new(cfg.links.base_url.clone()));
    let pipeline = ResponsePipeline::new(
        responder,
        port,
        cfg.responder.thinking_delay(),
        cfg.responder.turn_order,
    );
    info!(
        "Chat session started (knowledge base: {}, delay {}ms)",
        knowledge_source(&cfg),
        cfg.responder.thinking_delay_ms
    );

    if !args.quiet {
        print_greeting(pipeline.suggestions());
    }

    let mut pending = ReplyTracker::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(raw) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        pending.reap()?;
        match parse_line(&raw) {
            Line::Text(text) => pending.track(pipeline.submit(&text)),
            Line::QuickReply(number) => match pipeline.quick_reply(number) {
                Ok(reply) => pending.track(reply),
                Err(e) => eprintln!("{}", e),
            },
            Line::Help => print_help(pipeline.suggestions()),
            Line::Quit => break,
            Line::Unknown(command) => {
                eprintln!("Unknown command '{}'. Type /help for a list.", command)
            }
        }
    }

    debug!(
        "Input closed; waiting for {} scheduled replies.",
        pending.outstanding()
    );
    pending.finish().await?;
    info!(
        "Chat session ended after {} turns.",
        pipeline.conversation().len()
    );
    Ok(())
}

fn knowledge_source(cfg: &config::Config) -> String {
    match &cfg.responder.knowledge_base {
        Some(path) => path.clone(),
        None => "built-in".to_string(),
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::pipeline::TurnOrder;
    use crate::bot::render::testing::RecordingPort;
    use std::time::Duration;

    fn pipeline() -> ResponsePipeline {
        ResponsePipeline::new(
            Arc::new(Responder::builtin()),
            Arc::new(RecordingPort::default()),
            Duration::from_millis(800),
            TurnOrder::Completion,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_tracker_reaps_finished_replies() {
        let pipeline = pipeline();
        let mut tracker = ReplyTracker::new();
        for _ in 0..50 {
            tracker.track(pipeline.submit("blog"));
        }
        tracker.track(pipeline.submit("   "));
        assert_eq!(tracker.outstanding(), 50);

        tracker.reap().unwrap();
        assert_eq!(tracker.outstanding(), 50); // Still composing

        tokio::time::sleep(Duration::from_secs(1)).await;
        tracker.reap().unwrap();
        assert_eq!(tracker.outstanding(), 0);
        assert_eq!(pipeline.conversation().len(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_tracker_finish_waits_for_all() {
        let pipeline = pipeline();
        let mut tracker = ReplyTracker::new();
        tracker.track(pipeline.submit("join group"));
        tracker.track(pipeline.submit("login"));

        tracker.finish().await.unwrap();
        assert_eq!(pipeline.conversation().len(), 4);
    }

    #[test]
    fn test_parse_plain_text_is_untouched() {
        assert_eq!(
            parse_line("  join group "),
            Line::Text("  join group ".to_string())
        );
        assert_eq!(parse_line(""), Line::Text(String::new()));
    }

    #[test]
    fn test_parse_slash_commands() {
        assert_eq!(parse_line("/help"), Line::Help);
        assert_eq!(parse_line("/HELP"), Line::Help);
        assert_eq!(parse_line("/quit"), Line::Quit);
        assert_eq!(parse_line(" /exit "), Line::Quit);
        assert_eq!(parse_line("/2"), Line::QuickReply(2));
        assert_eq!(parse_line("/0"), Line::QuickReply(0));
        assert_eq!(parse_line("/papers"), Line::Unknown("/papers".to_string()));
    }

    #[test]
    fn test_parses_chat_flags() {
        let args = ChatArgs::try_parse_from([
            "chat",
            "--delay-ms",
            "0",
            "--match-mode",
            "word",
            "--turn-order",
            "submission",
            "-q",
        ])
        .unwrap();
        assert!(args.quiet);
        let overrides = args.responder.overrides();
        assert_eq!(overrides.thinking_delay_ms, Some(0));
        assert_eq!(
            overrides.match_mode,
            Some(crate::bot::matcher::MatchMode::Word)
        );
        assert_eq!(
            overrides.turn_order,
            Some(crate::bot::pipeline::TurnOrder::Submission)
        );
    }
}
