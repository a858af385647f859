//! # Helpbot Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file is the main entry point for the Helpbot CLI, a rule-based help
//! assistant for the research platform. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the appropriate command handler
//!
//! ## Architecture
//!
//! - Each top-level command (`chat`, `ask`, `kb`, `srv`) is a variant of `Commands`
//! - Commands are mapped to handler functions in their respective modules
//! - `--config` is global and handed to every handler that loads configuration
//! - All errors are propagated to this level for consistent handling
//!
//! ## Examples
//!
//! ```bash
//! # Talk to the bot
//! helpbot chat
//!
//! # One question, with debug logging
//! helpbot -vv ask "where are my bookmarks?"
//!
//! # Use a specific configuration file
//! helpbot --config ./helpbot.toml srv
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to appropriate command handler
//! 4. Format and display any errors that occur
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod bot; // Knowledge base, matcher, fallback, pipeline
mod commands; // Command handlers (chat, ask, kb, srv)
mod core; // Configuration and errors

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "helpbot",
    about = "🤖 Helpbot: rule-based help assistant for the research platform",
    long_about = "Answers platform questions from an ordered knowledge base of trigger phrases.\n\
                  Chat in the terminal, ask one-off questions, inspect the rules, or serve a chat API.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Read configuration from this file only, instead of the user and project files.
    #[arg(long, global = true, env = "HELPBOT_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Start an interactive conversation.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Ask a single question and print the answer.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    /// Inspect and validate knowledge bases.
    Kb(commands::kb::KbArgs),
    /// Serve the chat API over HTTP.
    Srv(commands::srv::SrvArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let config_path = cli.config.as_deref();
    let command_result = match cli.command {
        Commands::Chat(args) => commands::chat::handle_chat(args, config_path).await,
        Commands::Ask(args) => commands::ask::handle_ask(args, config_path).await,
        Commands::Kb(args) => commands::kb::handle_kb(args, config_path).await,
        Commands::Srv(args) => commands::srv::handle_srv(args, config_path).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
