//! # Helpbot CLI Ask Integration Tests
//!
//! File: cli/tests/ask.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Integration tests for `helpbot ask`: matched answers with links, fallback
//! replies, blank input, and the responder flags.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_ask_upload_question() {
    Sandbox::instant()
        .cmd()
        .args(["ask", "How do I upload a paper?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bot: 📄 To upload a paper:"))
        .stdout(predicate::str::contains("     1. Click 'Papers' in the navigation menu"))
        .stdout(predicate::str::contains("→ Upload Paper: /papers/upload/"));
}

#[test]
fn test_ask_joins_words() {
    Sandbox::instant()
        .cmd()
        .args(["ask", "where", "are", "my", "bookmarks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("🔖 Your bookmarks"));
}

#[test]
fn test_ask_links_use_base_url() {
    let sandbox = Sandbox::with_config(
        "[responder]\nthinking_delay_ms = 0\n\n[links]\nbase_url = \"https://research.example.org/\"\n",
    );
    sandbox
        .cmd()
        .args(["ask", "upload"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "→ Upload Paper: https://research.example.org/papers/upload/",
        ));
}

#[test]
fn test_ask_unmatched_gets_fallback() {
    Sandbox::instant()
        .cmd()
        .args(["ask", "asdkfjasdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Try asking:"))
        .stdout(predicate::str::contains("• How do I upload a paper?"))
        .stdout(predicate::str::contains("→").not());
}

#[test]
fn test_ask_blank_prints_nothing() {
    Sandbox::instant()
        .cmd()
        .args(["ask", "   "])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_ask_echo() {
    Sandbox::instant()
        .cmd()
        .args(["ask", "--echo", "trending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You: trending"))
        .stdout(predicate::str::contains("Bot: 🔥 Trending Topics"));
}

#[test]
fn test_ask_word_mode_flag() {
    // "ai" hides inside "said": a hit in substring mode, a miss in word mode.
    Sandbox::instant()
        .cmd()
        .args(["ask", "he said so"])
        .assert()
        .success()
        .stdout(predicate::str::contains("🌳 Yggdrasil"));

    Sandbox::instant()
        .cmd()
        .args(["ask", "--match-mode", "word", "he said so"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Try asking:"));
}

#[test]
fn test_ask_with_custom_knowledge_base() {
    let sandbox = Sandbox::instant();
    let kb = sandbox.write(
        "kb.toml",
        r#"
[[rules]]
triggers = ["refund"]
answer = "Refunds take 5 days."

[[rules.links]]
label = "Billing"
target = "/billing/"
"#,
    );
    sandbox
        .cmd()
        .arg("ask")
        .arg("--knowledge-base")
        .arg(&kb)
        .arg("can I get a refund?")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bot: Refunds take 5 days."))
        .stdout(predicate::str::contains("→ Billing: /billing/"));
}

#[test]
fn test_ask_delay_flag_overrides_config() {
    let sandbox = Sandbox::with_config("[responder]\nthinking_delay_ms = 50000\n");
    sandbox
        .cmd()
        .args(["ask", "--delay-ms", "0", "stats"])
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .success()
        .stdout(predicate::str::contains("📈 Analytics Dashboard"));
}

#[test]
fn test_ask_missing_knowledge_base_fails() {
    Sandbox::instant()
        .cmd()
        .args(["ask", "--knowledge-base", "/definitely/not/here.toml", "upload"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
