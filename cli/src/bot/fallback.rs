//! # Helpbot Fallback Selector
//!
//! File: cli/src/bot/fallback.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! When the matcher finds nothing, the reply is one of a fixed set of default
//! prompts, chosen uniformly at random on every call, followed by a short block
//! of example queries that nudges the user toward something the knowledge base
//! does answer:
//!
//! ```text
//! Hmm, I don't have information on that. Try asking about papers, groups, or platform features!
//!
//! Try asking:
//! • How do I upload a paper?
//! • Where are my bookmarks?
//! ```
//!
//! The prompt set is checked when the selector is built; `pick()` itself cannot
//! fail. The random source is injectable (`with_rng`) so tests can seed it.
//!
use super::builtin;
use crate::core::error::{HelpbotError, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Heading placed between the prompt and the example queries.
const EXAMPLES_HEADING: &str = "Try asking:";

/// Picks default prompts for inputs that matched no rule.
#[derive(Debug)]
pub struct FallbackSelector {
    prompts: Vec<String>,
    example_queries: Vec<String>,
    rng: Mutex<StdRng>,
}

impl FallbackSelector {
    /// Builds a selector seeded from OS entropy.
    ///
    /// ## Errors
    ///
    /// * `HelpbotError::EmptyFallback` if `prompts` is empty.
    /// * `HelpbotError::Config` if any prompt or example query is blank.
    pub fn new(prompts: Vec<String>, example_queries: Vec<String>) -> Result<Self> {
        if prompts.is_empty() {
            return Err(HelpbotError::EmptyFallback.into());
        }
        if prompts.iter().any(|p| p.trim().is_empty()) {
            return Err(HelpbotError::Config("fallback prompts must not be blank".into()).into());
        }
        if example_queries.iter().any(|q| q.trim().is_empty()) {
            return Err(
                HelpbotError::Config("fallback example queries must not be blank".into()).into(),
            );
        }
        Ok(Self {
            prompts,
            example_queries,
            rng: Mutex::new(StdRng::from_entropy()),
        })
    }

    /// The platform's default prompts and example queries.
    pub fn builtin() -> Self {
        Self {
            prompts: builtin::DEFAULT_PROMPTS.iter().map(|s| s.to_string()).collect(),
            example_queries: builtin::EXAMPLE_QUERIES.iter().map(|s| s.to_string()).collect(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replaces the random source.
    pub fn with_rng(self, rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            ..self
        }
    }

    /// Returns a uniformly chosen prompt followed by the example-queries block.
    pub fn pick(&self) -> String {
        let choice = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            rng.gen_range(0..self.prompts.len())
        };
        let mut reply = self.prompts[choice].clone();
        reply.push_str(&self.examples_block());
        reply
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// The example queries, also offered as quick replies.
    pub fn example_queries(&self) -> &[String] {
        &self.example_queries
    }

    /// `"\n\nTry asking:\n• q1\n• q2..."`, or an empty string when there are no examples.
    pub fn examples_block(&self) -> String {
        if self.example_queries.is_empty() {
            return String::new();
        }
        let mut block = format!("\n\n{}", EXAMPLES_HEADING);
        for query in &self.example_queries {
            block.push_str("\n• ");
            block.push_str(query);
        }
        block
    }
}
