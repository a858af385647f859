//! # Helpbot Responder
//!
//! File: cli/src/bot/responder.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Turns one piece of user input into one reply: the matched rule's answer and
//! links on a hit, or a fallback prompt with no links on a miss. This is the
//! synchronous, side-effect free half of a conversation turn. Timing and
//! rendering belong to the pipeline (`pipeline.rs`).
//!
use super::fallback::FallbackSelector;
use super::knowledge::{KnowledgeBase, Link};
use super::matcher::{MatchMode, MatchOutcome, Matcher};
use crate::core::config::Config;
use crate::core::error::Result;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReplySource {
    /// Answer of the rule at this 0-based knowledge base position.
    Rule { index: usize },
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub links: Vec<Link>,
    pub source: ReplySource,
}

impl Reply {
    pub fn is_fallback(&self) -> bool {
        self.source == ReplySource::Fallback
    }
}

/// Matcher plus fallback selector.
#[derive(Debug)]
pub struct Responder {
    matcher: Matcher,
    fallback: FallbackSelector,
}

impl Responder {
    pub fn new(matcher: Matcher, fallback: FallbackSelector) -> Self {
        Self { matcher, fallback }
    }

    /// Built-in knowledge base, substring matching, built-in fallback prompts.
    pub fn builtin() -> Self {
        Self::new(
            Matcher::new(Arc::new(KnowledgeBase::builtin()), MatchMode::Substring),
            FallbackSelector::builtin(),
        )
    }

    /// Builds the responder described by a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let kb = match &config.responder.knowledge_base {
            Some(path) => KnowledgeBase::load(Path::new(path))?,
            None => KnowledgeBase::builtin(),
        };
        let fallback = FallbackSelector::new(
            config.fallback.prompts.clone(),
            config.fallback.example_queries.clone(),
        )?;
        Ok(Self::new(
            Matcher::new(Arc::new(kb), config.responder.match_mode),
            fallback,
        ))
    }

    /// Answers `input`. The fallback selector only runs when no rule matches.
    pub fn respond(&self, input: &str) -> Reply {
        match self.matcher.find(input) {
            MatchOutcome::Hit { index, rule, .. } => Reply {
                text: rule.answer().to_string(),
                links: rule.links().to_vec(),
                source: ReplySource::Rule { index },
            },
            MatchOutcome::NoMatch => Reply {
                text: self.fallback.pick(),
                links: Vec::new(),
                source: ReplySource::Fallback,
            },
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn fallback(&self) -> &FallbackSelector {
        &self.fallback
    }
}
