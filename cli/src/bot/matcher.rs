//! # Helpbot Matcher
//!
//! File: cli/src/bot/matcher.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Finds the rule that answers a piece of user input. The algorithm is a plain
//! first-hit scan:
//! 1. Lowercase the input (no trimming, no tokenizing).
//! 2. Walk the rules in knowledge base order, and each rule's triggers in
//!    authored order.
//! 3. Return the first rule with a trigger contained in the lowered input, or
//!    `NoMatch` once the knowledge base is exhausted.
//!
//! Earlier rules always win, however short or generic their trigger is.
//!
//! ## Match Modes
//!
//! - `substring` (default): raw containment. A trigger inside a longer word still
//!   counts, so `"ai"` matches `"said"`.
//! - `word`: opt-in. A hit only counts when the characters on either side of it
//!   are not alphanumeric.
//!
//! ## Examples
//!
//! ```rust
//! let matcher = Matcher::new(Arc::new(KnowledgeBase::builtin()), MatchMode::Substring);
//! match matcher.find("How do I upload a paper?") {
//!     MatchOutcome::Hit { index, rule, trigger } => println!("rule {} via '{}'", index, trigger),
//!     MatchOutcome::NoMatch => println!("fallback"),
//! }
//! ```
//!
use super::knowledge::{KnowledgeBase, Rule};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How a trigger must appear in the input to count as a hit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Trigger contained anywhere in the input, including inside longer words.
    #[default]
    Substring,
    /// Trigger must not be flanked by alphanumeric characters.
    Word,
}

/// Result of matching one input against the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome<'a> {
    Hit {
        /// 0-based position of the rule in the knowledge base.
        index: usize,
        rule: &'a Rule,
        /// The trigger that fired, as authored.
        trigger: &'a str,
    },
    NoMatch,
}

impl<'a> MatchOutcome<'a> {
    pub fn rule(&self) -> Option<&'a Rule> {
        match self {
            MatchOutcome::Hit { rule, .. } => Some(rule),
            MatchOutcome::NoMatch => None,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            MatchOutcome::Hit { index, .. } => Some(*index),
            MatchOutcome::NoMatch => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, MatchOutcome::Hit { .. })
    }
}

/// A trigger that loses to an earlier rule for every possible input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shadowed<'a> {
    pub index: usize,
    pub trigger: &'a str,
    pub by_index: usize,
    pub by_trigger: &'a str,
}

/// Stateless first-hit matcher over an injected knowledge base.
#[derive(Debug, Clone)]
pub struct Matcher {
    kb: Arc<KnowledgeBase>,
    /// Lowercased triggers, parallel to `kb.rules()`.
    lowered: Vec<Vec<String>>,
    mode: MatchMode,
}

impl Matcher {
    pub fn new(kb: Arc<KnowledgeBase>, mode: MatchMode) -> Self {
        let lowered = kb
            .rules()
            .iter()
            .map(|rule| rule.triggers().iter().map(|t| t.to_lowercase()).collect())
            .collect();
        Self { kb, lowered, mode }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Returns the first rule (in knowledge base order) with a trigger found in `input`.
    pub fn find(&self, input: &str) -> MatchOutcome<'_> {
        let lowered_input = input.to_lowercase();

        for (index, (rule, triggers)) in self.kb.rules().iter().zip(&self.lowered).enumerate() {
            for (position, trigger) in triggers.iter().enumerate() {
                if self.contains(&lowered_input, trigger) {
                    return MatchOutcome::Hit {
                        index,
                        rule,
                        trigger: &rule.triggers()[position],
                    };
                }
            }
        }

        MatchOutcome::NoMatch
    }

    /// Triggers that can never fire because an earlier rule answers any input
    /// containing them.
    ///
    /// A trigger is shadowed when matching the trigger text itself already hits
    /// an earlier rule. Containment is transitive in both modes, so every input
    /// that contains the trigger goes to that earlier rule too.
    pub fn shadowed_triggers(&self) -> Vec<Shadowed<'_>> {
        let mut shadowed = Vec::new();
        for (index, rule) in self.kb.rules().iter().enumerate() {
            for trigger in rule.triggers() {
                if let MatchOutcome::Hit {
                    index: by_index,
                    trigger: by_trigger,
                    ..
                } = self.find(trigger)
                {
                    if by_index < index {
                        shadowed.push(Shadowed {
                            index,
                            trigger: trigger.as_str(),
                            by_index,
                            by_trigger,
                        });
                    }
                }
            }
        }
        shadowed
    }

    fn contains(&self, haystack: &str, needle: &str) -> bool {
        match self.mode {
            MatchMode::Substring => haystack.contains(needle),
            MatchMode::Word => contains_word(haystack, needle),
        }
    }
}

/// True if `needle` occurs in `haystack` with no alphanumeric character directly
/// before or after it. Overlapping occurrences are all considered.
fn contains_word(haystack: &str, needle: &str) -> bool {
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let start = from + offset;
        let end = start + needle.len();
        let clear_before = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let clear_after = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if clear_before && clear_after {
            return true;
        }
        // Resume one character past this start; the next hit may overlap it.
        match haystack[start..].chars().next() {
            Some(c) => from = start + c.len_utf8(),
            None => return false,
        }
    }
    false
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::knowledge::Link;

    fn builtin(mode: MatchMode) -> Matcher {
        Matcher::new(Arc::new(KnowledgeBase::builtin()), mode)
    }

    #[test]
    fn test_matching_is_deterministic() {
        let matcher = builtin(MatchMode::Substring);
        for input in ["where are my bookmarks?", "asdkfjasdf", "trending stats", ""] {
            let first = matcher.find(input);
            for _ in 0..5 {
                assert_eq!(matcher.find(input), first);
            }
        }
    }

    #[test]
    fn test_earlier_rule_wins_regardless_of_specificity() {
        let kb = KnowledgeBase::new(vec![
            Rule::new(["pa"], "short and generic", vec![]),
            Rule::new(["upload a paper", "paper"], "long and specific", vec![]),
        ])
        .unwrap();
        let matcher = Matcher::new(Arc::new(kb), MatchMode::Substring);

        let outcome = matcher.find("upload a paper");
        assert_eq!(outcome.index(), Some(0));
        assert_eq!(outcome.rule().unwrap().answer(), "short and generic");
    }

    #[test]
    fn test_first_trigger_reported_within_rule() {
        let matcher = builtin(MatchMode::Substring);
        // "join group" contains both "group" and "join group"; "group" is authored first.
        match matcher.find("join group") {
            MatchOutcome::Hit { index, trigger, .. } => {
                assert_eq!(index, 5);
                assert_eq!(trigger, "group");
            }
            MatchOutcome::NoMatch => panic!("expected the groups rule"),
        }
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = builtin(MatchMode::Substring);
        let upper = matcher.find("UPLOAD a paper");
        let lower = matcher.find("upload a paper");
        assert_eq!(upper, lower);
        assert_eq!(upper.index(), Some(0));
    }

    #[test]
    fn test_authored_trigger_case_is_ignored() {
        let kb = KnowledgeBase::new(vec![Rule::new(["ORCID"], "orcid answer", vec![])]).unwrap();
        let matcher = Matcher::new(Arc::new(kb), MatchMode::Substring);
        assert!(matcher.find("link my orcid").is_hit());
    }

    #[test]
    fn test_substring_inside_word_matches() {
        let matcher = builtin(MatchMode::Substring);
        match matcher.find("said") {
            MatchOutcome::Hit { rule, trigger, .. } => {
                assert_eq!(trigger, "ai");
                assert_eq!(
                    rule.links(),
                    &[Link::new("Open Yggdrasil", "/chat/yggdrasil_chatbot/")]
                );
            }
            MatchOutcome::NoMatch => panic!("'ai' should match inside 'said'"),
        }
    }

    #[test]
    fn test_word_mode_requires_boundaries() {
        let matcher = builtin(MatchMode::Word);
        assert_eq!(matcher.find("said"), MatchOutcome::NoMatch);
        assert_eq!(matcher.find("what is ai?").index(), Some(13));
        assert_eq!(matcher.find("AI tools").index(), Some(13));
    }

    #[test]
    fn test_contains_word_edges() {
        assert!(contains_word("ai", "ai"));
        assert!(contains_word("ask the ai.", "ai"));
        assert!(!contains_word("said", "ai"));
        assert!(!contains_word("aid", "ai"));
        // Second occurrence is bounded even though the first is not.
        assert!(contains_word("said ai", "ai"));
        assert!(contains_word("go to main page now", "main page"));
    }

    #[test]
    fn test_contains_word_overlapping_occurrences() {
        // The first hit of "ab ab" starts inside "xab"; the bounded one begins at byte 4.
        assert!(contains_word("xab ab ab", "ab ab"));
        assert!(contains_word("aaa aa", "aa"));
        assert!(!contains_word("xab abx", "ab ab"));
        assert!(contains_word("é ai", "ai"));
    }

    #[test]
    fn test_no_match() {
        let matcher = builtin(MatchMode::Substring);
        assert_eq!(matcher.find("asdkfjasdf"), MatchOutcome::NoMatch);
        assert!(matcher.find("asdkfjasdf").rule().is_none());
    }

    #[test]
    fn test_empty_kb_never_matches() {
        let matcher = Matcher::new(Arc::new(KnowledgeBase::empty()), MatchMode::Substring);
        assert_eq!(matcher.find("upload"), MatchOutcome::NoMatch);
        assert_eq!(matcher.find(""), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_independent_inputs() {
        let matcher = builtin(MatchMode::Substring);
        assert_eq!(matcher.find("join group").index(), Some(5));
        assert_eq!(matcher.find("message someone").index(), Some(7));
    }

    #[test]
    fn test_shadowed_triggers_in_builtin_table() {
        let matcher = builtin(MatchMode::Substring);
        let shadowed = matcher.shadowed_triggers();
        // "researchers" (publishers) always loses to "search".
        assert!(shadowed.contains(&Shadowed {
            index: 15,
            trigger: "researchers",
            by_index: 11,
            by_trigger: "search",
        }));
        // "chatbot" (Yggdrasil) always loses to "chat" (messages).
        assert!(shadowed
            .iter()
            .any(|s| s.trigger == "chatbot" && s.by_index == 7));
        // A trigger that only overlaps its own rule is not reported.
        assert!(!shadowed.iter().any(|s| s.trigger == "join group"));
    }

    #[test]
    fn test_word_mode_shadows_less() {
        let matcher = builtin(MatchMode::Word);
        let shadowed = matcher.shadowed_triggers();
        assert!(!shadowed.iter().any(|s| s.trigger == "researchers"));
        // "hot topics" still contains the whole word "topics".
        assert!(shadowed
            .iter()
            .any(|s| s.trigger == "hot topics" && s.by_trigger == "topics"));
    }
}
