//! # Knowledge Base Match Probe
//!
//! File: cli/src/commands/kb/probe.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `helpbot kb match <TEXT>` runs the matcher on `TEXT` exactly as a submission
//! would (trimmed, then matched) and reports the outcome immediately: the winning
//! rule number, the trigger that fired, and the answer. Nothing is appended to
//! any conversation and there is no thinking delay.
//!
use crate::bot::matcher::{MatchMode, MatchOutcome};
use crate::bot::responder::Responder;
use crate::core::config::{self, ResponderOverrides};
use crate::core::error::Result;
use clap::Parser;
use std::path::Path;

#[derive(Parser, Debug)]
pub struct MatchArgs {
    /// Text to match. Several words are joined with single spaces.
    #[arg(required = true, num_args = 1.., value_name = "TEXT")]
    pub text: Vec<String>,

    #[arg(long, value_enum)]
    pub match_mode: Option<MatchMode>,

    #[arg(long, value_name = "FILE")]
    pub knowledge_base: Option<String>,
}

pub async fn handle_match(args: MatchArgs, config_path: Option<&Path>) -> Result<()> {
    let overrides = ResponderOverrides {
        match_mode: args.match_mode,
        knowledge_base: args.knowledge_base.clone(),
        ..Default::default()
    };
    let cfg = config::load_config(config_path, &overrides)?;
    let responder = Responder::from_config(&cfg)?;

    let input = args.text.join(" ");
    println!("{}", describe(&responder, &input));
    Ok(())
}

fn describe(responder: &Responder, input: &str) -> String {
    let text = input.trim();
    if text.is_empty() {
        return "Input is blank: it would be ignored without a reply.".to_string();
    }

    let matcher = responder.matcher();
    match matcher.find(text) {
        MatchOutcome::Hit {
            index,
            rule,
            trigger,
        } => {
            let mut out = format!(
                "Rule #{} matched on trigger \"{}\" ({:?} mode)\n\n{}",
                index + 1,
                trigger,
                matcher.mode(),
                rule.answer()
            );
            for link in rule.links() {
                out.push_str(&format!("\n→ {}: {}", link.label, link.target));
            }
            out
        }
        MatchOutcome::NoMatch => format!(
            "No rule matches ({} rules checked). The reply would be a fallback prompt.",
            matcher.knowledge_base().len()
        ),
    }
}
