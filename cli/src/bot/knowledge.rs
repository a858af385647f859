//! # Helpbot Knowledge Base
//!
//! File: cli/src/bot/knowledge.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The knowledge base is the ordered, read-only collection of rules the matcher
//! walks. Each rule maps a set of trigger phrases to a single answer, plus any
//! navigation links that should accompany it.
//!
//! ## Architecture
//!
//! - `Link`: A `{label, target}` navigation affordance attached to an answer.
//! - `Rule`: Triggers, answer and links. Fields are private; a rule cannot be
//!   changed once the knowledge base holds it.
//! - `KnowledgeBase`: The ordered rule list. Built once (from the built-in table
//!   or a TOML file), validated on construction, then shared behind an `Arc`.
//!
//! Rule order is priority order. Nothing here sorts, deduplicates or reorders.
//!
//! ## Examples
//!
//! Knowledge base file format:
//!
//! ```toml
//! [[rules]]
//! triggers = ["upload", "submit"]
//! answer = "To upload a paper:\n1. Click 'Papers'..."
//!
//! [[rules.links]]
//! label = "Upload Paper"
//! target = "/papers/upload/"
//! ```
//!
//! Loading:
//!
//! ```rust
//! let kb = match &config.responder.knowledge_base {
//!     Some(path) => KnowledgeBase::load(Path::new(path))?,
//!     None => KnowledgeBase::builtin(),
//! };
//! ```
//!
use super::builtin;
use crate::core::error::{HelpbotError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::{debug, info};

/// A navigation affordance attached to an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    /// Text shown to the user (e.g. "Upload Paper").
    pub label: String,
    /// Where activating the link navigates to (usually a site-relative path).
    pub target: String,
}

impl Link {
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }
}

/// One trigger→answer rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    triggers: Vec<String>,
    answer: String,
    #[serde(default)]
    links: Vec<Link>,
}

impl Rule {
    /// Creates a rule. Validation happens when the rule is handed to
    /// [`KnowledgeBase::new`].
    pub fn new<T, S>(triggers: T, answer: impl Into<String>, links: Vec<Link>) -> Self
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            triggers: triggers.into_iter().map(Into::into).collect(),
            answer: answer.into(),
            links,
        }
    }

    /// Trigger phrases in authored order.
    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns the reason this rule is unusable, if any.
    fn problem(&self) -> Option<String> {
        if self.triggers.is_empty() {
            return Some("rule has no triggers".into());
        }
        if let Some(pos) = self.triggers.iter().position(|t| t.trim().is_empty()) {
            // A blank trigger is a substring of every input and would shadow all later rules.
            return Some(format!("trigger {} is blank", pos + 1));
        }
        if self.answer.trim().is_empty() {
            return Some("answer is blank".into());
        }
        for link in &self.links {
            if link.label.trim().is_empty() || link.target.trim().is_empty() {
                return Some(format!(
                    "link '{}' -> '{}' needs both a label and a target",
                    link.label, link.target
                ));
            }
        }
        None
    }
}

/// Deserialization shape of a knowledge base TOML file.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct KnowledgeBaseFile {
    #[serde(default)]
    rules: Vec<Rule>,
}

/// The ordered, immutable rule collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    rules: Vec<Rule>,
}

impl KnowledgeBase {
    /// Builds a knowledge base from rules in priority order.
    ///
    /// ## Errors
    ///
    /// Returns `HelpbotError::InvalidRule` (1-based position) for the first rule
    /// with no triggers, a blank trigger, a blank answer, or an incomplete link.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        for (idx, rule) in rules.iter().enumerate() {
            if let Some(reason) = rule.problem() {
                return Err(HelpbotError::InvalidRule {
                    position: idx + 1,
                    reason,
                }
                .into());
            }
        }
        debug!("Knowledge base built with {} rules", rules.len());
        Ok(Self { rules })
    }

    /// A knowledge base with no rules. Valid; it never matches.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The platform help table from `builtin.rs`.
    pub fn builtin() -> Self {
        let rules = builtin::RULES
            .iter()
            .map(|entry| {
                Rule::new(
                    entry.triggers.iter().copied(),
                    entry.answer,
                    entry.links
                        .iter()
                        .map(|(label, target)| Link::new(*label, *target))
                        .collect(),
                )
            })
            .collect();
        // The static table is covered by `test_builtin_rules_are_valid`.
        Self { rules }
    }

    /// Parses a knowledge base from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: KnowledgeBaseFile =
            toml::from_str(content).context("Failed to parse knowledge base TOML")?;
        Self::new(file.rules)
    }

    /// Reads and parses a knowledge base file.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading knowledge base from: {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read knowledge base: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid knowledge base file: {}", path.display()))
    }

    /// All rules in authoring (priority) order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_rules_are_valid() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.len(), 23);
        // Re-run construction-time validation over the static table.
        let rebuilt = KnowledgeBase::new(kb.rules().to_vec()).expect("built-in table must validate");
        assert_eq!(rebuilt, kb);
    }

    #[test]
    fn test_builtin_order_is_authoring_order() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.rules()[0].triggers()[0], "upload");
        assert_eq!(kb.rules()[1].triggers()[0], "bookmark");
        assert_eq!(kb.rules().last().unwrap().triggers()[0], "like");
        // Repeated lookups hand back the same order.
        let first: Vec<_> = kb.rules().iter().map(|r| r.answer()).collect();
        let second: Vec<_> = kb.rules().iter().map(|r| r.answer()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_upload_rule_has_single_link() {
        let kb = KnowledgeBase::builtin();
        let upload = &kb.rules()[0];
        assert_eq!(upload.links(), &[Link::new("Upload Paper", "/papers/upload/")]);
        assert!(upload.answer().starts_with("📄 To upload a paper:"));
    }

    #[test]
    fn test_empty_kb_is_valid() {
        let kb = KnowledgeBase::new(Vec::new()).unwrap();
        assert!(kb.is_empty());
        assert_eq!(kb, KnowledgeBase::empty());
    }

    #[test]
    fn test_rejects_rule_without_triggers() {
        let rules = vec![
            Rule::new(["ok"], "fine", vec![]),
            Rule::new(Vec::<String>::new(), "orphan answer", vec![]),
        ];
        let err = KnowledgeBase::new(rules).unwrap_err();
        match err.downcast_ref::<HelpbotError>() {
            Some(HelpbotError::InvalidRule { position, reason }) => {
                assert_eq!(*position, 2);
                assert!(reason.contains("no triggers"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_blank_trigger_and_answer() {
        let blank_trigger = KnowledgeBase::new(vec![Rule::new(["a", "  "], "x", vec![])]);
        assert!(blank_trigger.unwrap_err().to_string().contains("trigger 2 is blank"));

        let blank_answer = KnowledgeBase::new(vec![Rule::new(["a"], "\n", vec![])]);
        assert!(blank_answer.unwrap_err().to_string().contains("answer is blank"));

        let bad_link = KnowledgeBase::new(vec![Rule::new(["a"], "x", vec![Link::new("Go", "")])]);
        assert!(bad_link.unwrap_err().to_string().contains("needs both a label and a target"));
    }

    #[test]
    fn test_from_toml_str() {
        let toml_content = r#"
            [[rules]]
            triggers = ["upload", "submit"]
            answer = "Upload here.\nThen wait."

            [[rules.links]]
            label = "Upload Paper"
            target = "/papers/upload/"

            [[rules]]
            triggers = ["help"]
            answer = "Ask away."
        "#;
        let kb = KnowledgeBase::from_toml_str(toml_content).expect("Failed to parse KB");
        assert_eq!(kb.len(), 2);
        assert_eq!(kb.rules()[0].answer(), "Upload here.\nThen wait.");
        assert_eq!(kb.rules()[0].links().len(), 1);
        assert!(kb.rules()[1].links().is_empty());
    }

    #[test]
    fn test_from_toml_rejects_unknown_fields() {
        let toml_content = r#"
            [[rules]]
            triggers = ["x"]
            answer = "y"
            priority = 3
        "#;
        assert!(KnowledgeBase::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            "[[rules]]\ntriggers = [\"ping\"]\nanswer = \"pong\"\n",
        )
        .unwrap();
        let kb = KnowledgeBase::load(file.path()).unwrap();
        assert_eq!(kb.rules()[0].answer(), "pong");
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = KnowledgeBase::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
