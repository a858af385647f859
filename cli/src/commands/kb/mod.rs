//! # Helpbot Knowledge Base Tools
//!
//! File: cli/src/commands/kb/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module is the `helpbot kb` command group. It inspects the knowledge base
//! without running a conversation, which makes it the quickest way to find out
//! why a question got the answer it did.
//!
//! ## Architecture
//!
//! - `list`: print every rule in priority order
//! - `probe`: `helpbot kb match <TEXT>`, show the winning rule and trigger
//! - `check`: validate a knowledge base file
//!
//! `list` and `match` run against the effective configuration, so
//! `--knowledge-base` and `--match-mode` apply to them too.
//!
//! ## Examples
//!
//! ```bash
//! helpbot kb list
//! helpbot kb match "he said so"
//! helpbot kb check ./faq.toml
//! ```
//!
use crate::core::error::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

/// Contains the handler and arguments for `helpbot kb check`.
mod check;
/// Contains the handler and arguments for `helpbot kb list`.
mod list;
/// Contains the handler and arguments for `helpbot kb match`.
mod probe;

/// # Knowledge Base Command Group Arguments (`KbArgs`)
#[derive(Parser, Debug)]
pub struct KbArgs {
    #[command(subcommand)]
    command: KbCommand,
}

#[derive(Subcommand, Debug)]
enum KbCommand {
    /// List the rules in priority order.
    List(list::ListArgs),
    /// Show which rule and trigger answer a piece of text.
    #[command(name = "match")]
    Match(probe::MatchArgs),
    /// Validate a knowledge base file.
    Check(check::CheckArgs),
}

/// # Handle Knowledge Base Command (`handle_kb`)
///
/// Dispatches to the selected subcommand handler.
pub async fn handle_kb(args: KbArgs, config_path: Option<&Path>) -> Result<()> {
    match args.command {
        KbCommand::List(args) => list::handle_list(args, config_path).await?,
        KbCommand::Match(args) => probe::handle_match(args, config_path).await?,
        KbCommand::Check(args) => check::handle_check(args).await?,
    }
    Ok(())
}
