//! # Knowledge Base Check
//!
//! File: cli/src/commands/kb/check.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Validates a knowledge base file before it is wired into a configuration:
//! - The file must parse as TOML with a `[[rules]]` array.
//! - Every rule needs at least one non-blank trigger and a non-blank answer.
//! - Every link needs a label and a target.
//!
//! Any of these failures makes the command exit with an error naming the first
//! bad rule. A valid file may still contain triggers that can never fire because
//! an earlier rule catches every input containing them; those are reported as
//! warnings and do not fail the check.
//!
//! ## Examples
//!
//! ```toml
//! [[rules]]
//! triggers = ["refund", "money back"]
//! answer = "Refunds are processed within 5 days."
//! links = [{ label = "Billing", target = "/billing/" }]
//! ```
//!
use crate::bot::knowledge::KnowledgeBase;
use crate::bot::matcher::{MatchMode, Matcher};
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Knowledge base file to validate.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Match mode used for the shadowed trigger report.
    #[arg(long, value_enum, default_value_t = MatchMode::Substring)]
    pub match_mode: MatchMode,
}

pub async fn handle_check(args: CheckArgs) -> Result<()> {
    let kb = Arc::new(KnowledgeBase::load(&args.file)?);
    info!("{} parsed with {} rules", args.file.display(), kb.len());

    let matcher = Matcher::new(kb, args.match_mode);
    print!("{}", report(&matcher, &args.file.display().to_string()));
    Ok(())
}

fn report(matcher: &Matcher, name: &str) -> String {
    let kb = matcher.knowledge_base();
    let mut out = format!("✅ {}: {} rules OK\n", name, kb.len());
    if kb.is_empty() {
        out.push_str("⚠️  No rules: every question will get a fallback prompt.\n");
    }
    for shadow in matcher.shadowed_triggers() {
        out.push_str(&format!(
            "⚠️  Rule #{} trigger \"{}\" never fires: rule #{} matches it first via \"{}\".\n",
            shadow.index + 1,
            shadow.trigger,
            shadow.by_index + 1,
            shadow.by_trigger
        ));
    }
    out
}
