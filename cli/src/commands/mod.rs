//! # Helpbot Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates all top-level commands that comprise the Helpbot CLI.
//! It serves as the central point for importing command modules and makes them
//! accessible to the main application entry point (`main.rs`).
//!
//! ## Command Groups
//!
//! - `chat`: Interactive conversation in the terminal
//! - `ask`: One question, one answer
//! - `kb`: Knowledge base inspection (`list`, `match`, `check`)
//! - `srv`: HTTP chat API
//!
//! Commands that produce replies share the `ResponderArgs` flags defined here.
//!
use crate::bot::matcher::MatchMode;
use crate::bot::pipeline::TurnOrder;
use crate::core::config::ResponderOverrides;
use clap::Args;

/// One-shot question command.
pub mod ask;
/// Interactive chat session. Includes quick replies and slash commands.
pub mod chat;
/// Knowledge base inspection. Includes subcommands `list`, `match`, `check`.
pub mod kb;
/// HTTP chat API. Includes configuration and server logic.
pub mod srv;

/// Flags shared by every command that answers questions.
#[derive(Args, Debug, Clone, Default)]
pub struct ResponderArgs {
    /// Thinking delay before each reply, in milliseconds.
    #[arg(long, env = "HELPBOT_DELAY_MS")]
    pub delay_ms: Option<u64>,

    /// How triggers are matched against the input.
    #[arg(long, value_enum)]
    pub match_mode: Option<MatchMode>,

    /// Order in which overlapping replies are appended.
    #[arg(long, value_enum)]
    pub turn_order: Option<TurnOrder>,

    /// Use this knowledge base file instead of the built-in rules.
    #[arg(long, value_name = "FILE")]
    pub knowledge_base: Option<String>,
}

impl ResponderArgs {
    pub fn overrides(&self) -> ResponderOverrides {
        ResponderOverrides {
            thinking_delay_ms: self.delay_ms,
            match_mode: self.match_mode,
            turn_order: self.turn_order,
            knowledge_base: self.knowledge_base.clone(),
        }
    }
}
