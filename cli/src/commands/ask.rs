//! # Helpbot One-Shot Question
//!
//! File: cli/src/commands/ask.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `helpbot ask <TEXT>` submits a single message through the same pipeline the
//! chat session uses, prints the bot turn once the thinking delay has elapsed and
//! exits. Blank text produces no turn and no output.
//!
//! ## Examples
//!
//! ```bash
//! helpbot ask "How do I upload a paper?"
//! helpbot ask --delay-ms 0 --echo where are my bookmarks
//! ```
//!
use super::ResponderArgs;
use crate::bot::pipeline::ResponsePipeline;
use crate::bot::render::TerminalPort;
use crate::bot::responder::Responder;
use crate::core::config;
use crate::core::error::Result;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// # Ask Command Arguments (`AskArgs`)
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question. Several words are joined with single spaces.
    #[arg(required = true, num_args = 1.., value_name = "TEXT")]
    pub text: Vec<String>,

    /// Print the question as a `You:` line before the answer.
    #[arg(long)]
    pub echo: bool,

    #[command(flatten)]
    pub responder: ResponderArgs,
}

pub async fn handle_ask(args: AskArgs, config_path: Option<&Path>) -> Result<()> {
    let cfg = config::load_config(config_path, &args.responder.overrides())?;
    let responder = Arc::new(Responder::from_config(&cfg)?);
    let port = Arc::new(TerminalPort::new(cfg.links.base_url.clone()).echo_user(args.echo));
    let pipeline = ResponsePipeline::new(
        responder,
        port,
        cfg.responder.thinking_delay(),
        cfg.responder.turn_order,
    );

    let question = args.text.join(" ");
    match pipeline.submit(&question) {
        Some(pending) => {
            pending.wait().await?;
        }
        None => info!("Nothing to ask: the question is blank."),
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_multi_word_question() {
        let args = AskArgs::try_parse_from(["ask", "where", "are", "my", "bookmarks"]).unwrap();
        assert_eq!(args.text.join(" "), "where are my bookmarks");
        assert!(!args.echo);
    }

    #[test]
    fn test_question_is_required() {
        assert!(AskArgs::try_parse_from(["ask"]).is_err());
    }
}
