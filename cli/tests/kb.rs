//! # Helpbot CLI Knowledge Base Integration Tests
//!
//! File: cli/tests/kb.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Integration tests for the `helpbot kb` command group: `list`, `match` and
//! `check`.
//!

mod common;
use common::*;
use predicates::prelude::*;

const VALID_KB: &str = r#"
[[rules]]
triggers = ["search"]
answer = "Use the search page."

[[rules]]
triggers = ["publisher", "researchers"]
answer = "Browse publishers."
links = [{ label = "Publishers", target = "/publishers/" }]
"#;

#[test]
fn test_kb_list_builtin() {
    Sandbox::instant()
        .cmd()
        .args(["kb", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("23 rules, highest priority first:"))
        .stdout(predicate::str::contains("#1   upload, submit, add paper, publish paper"))
        .stdout(predicate::str::contains("#14  yggdrasil, ai, chatbot, research assistant"));
}

#[test]
fn test_kb_list_custom_file_full() {
    let sandbox = Sandbox::instant();
    let kb = sandbox.write("kb.toml", VALID_KB);
    sandbox
        .cmd()
        .args(["kb", "list", "--full", "--knowledge-base"])
        .arg(&kb)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rules"))
        .stdout(predicate::str::contains("→ Publishers: /publishers/"));
}

#[test]
fn test_kb_match_reports_rule_and_trigger() {
    Sandbox::instant()
        .cmd()
        .args(["kb", "match", "he said so"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rule #14 matched on trigger \"ai\""));
}

#[test]
fn test_kb_match_word_mode() {
    Sandbox::instant()
        .cmd()
        .args(["kb", "match", "--match-mode", "word", "he said so"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No rule matches"));
}

#[test]
fn test_kb_match_prefers_earlier_rule() {
    // "join group" is a trigger of the groups rule, but its first trigger "group" fires first.
    Sandbox::instant()
        .cmd()
        .args(["kb", "match", "join", "group"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rule #6 matched on trigger \"group\""));
}

#[test]
fn test_kb_check_valid_file_with_warnings() {
    let sandbox = Sandbox::instant();
    let kb = sandbox.write("kb.toml", VALID_KB);
    sandbox
        .cmd()
        .args(["kb", "check"])
        .arg(&kb)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rules OK"))
        .stdout(predicate::str::contains(
            "Rule #2 trigger \"researchers\" never fires: rule #1 matches it first via \"search\".",
        ));
}

#[test]
fn test_kb_check_invalid_rule() {
    let sandbox = Sandbox::instant();
    let kb = sandbox.write("bad.toml", "[[rules]]\ntriggers = []\nanswer = \"x\"\n");
    sandbox
        .cmd()
        .args(["kb", "check"])
        .arg(&kb)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid knowledge base rule #1: rule has no triggers"));
}

#[test]
fn test_kb_check_unparseable_file() {
    let sandbox = Sandbox::instant();
    let kb = sandbox.write("bad.toml", "[[rules]\nthis is not toml");
    sandbox
        .cmd()
        .args(["kb", "check"])
        .arg(&kb)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse knowledge base TOML"));
}

#[test]
fn test_kb_check_missing_file() {
    Sandbox::instant()
        .cmd()
        .args(["kb", "check", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read knowledge base"));
}
