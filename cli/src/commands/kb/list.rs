//! # Knowledge Base List
//!
//! File: cli/src/commands/kb/list.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Prints every rule of the effective knowledge base in priority order: the
//! 1-based rule number, its triggers in authored order, and the first line of
//! its answer. `--full` prints whole answers and links instead.
//!
use crate::bot::knowledge::{KnowledgeBase, Rule};
use crate::bot::render::resolve_target;
use crate::bot::responder::Responder;
use crate::core::config::{self, ResponderOverrides};
use crate::core::error::Result;
use clap::Parser;
use std::path::Path;
use tracing::debug;

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Print complete answers and links.
    #[arg(long)]
    pub full: bool,

    /// List this knowledge base file instead of the configured one.
    #[arg(long, value_name = "FILE")]
    pub knowledge_base: Option<String>,
}

pub async fn handle_list(args: ListArgs, config_path: Option<&Path>) -> Result<()> {
    let overrides = ResponderOverrides {
        knowledge_base: args.knowledge_base.clone(),
        ..Default::default()
    };
    let cfg = config::load_config(config_path, &overrides)?;
    let responder = Responder::from_config(&cfg)?;
    let kb = responder.matcher().knowledge_base();
    debug!("Listing {} rules", kb.len());

    print!("{}", format_listing(kb, args.full, cfg.links.base_url.as_deref()));
    Ok(())
}

fn format_listing(kb: &KnowledgeBase, full: bool, base_url: Option<&str>) -> String {
    if kb.is_empty() {
        return "The knowledge base has no rules; every question gets a fallback prompt.\n"
            .to_string();
    }

    let mut out = format!("{} rules, highest priority first:\n\n", kb.len());
    for (i, rule) in kb.rules().iter().enumerate() {
        out.push_str(&format!("#{:<3} {}\n", i + 1, rule.triggers().join(", ")));
        if full {
            out.push_str(&format_rule_body(rule, base_url));
        } else {
            let summary = rule.answer().lines().next().unwrap_or_default();
            out.push_str(&format!("     {}\n", summary));
        }
    }
    out
}

fn format_rule_body(rule: &Rule, base_url: Option<&str>) -> String {
    let mut out = String::new();
    for line in rule.answer().lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str(&format!("     {}\n", line));
        }
    }
    for link in rule.links() {
        out.push_str(&format!(
            "     → {}: {}\n",
            link.label,
            resolve_target(base_url, &link.target)
        ));
    }
    out.push('\n');
    out
}
