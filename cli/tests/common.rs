//! # Helpbot CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test binary
//! runs the compiled `helpbot` executable through `assert_cmd`.
//!
//! Every command built here is isolated from the developer's machine: it reads
//! configuration only from a file inside a temporary directory (never the user
//! or project config) and ignores `HELPBOT_*` variables from the environment.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Command for the `helpbot` binary with no configuration isolation.
pub fn helpbot_cmd() -> Command {
    let mut cmd = Command::cargo_bin("helpbot").expect("Failed to find helpbot binary for testing");
    cmd.env_remove("HELPBOT_CONFIG")
        .env_remove("HELPBOT_DELAY_MS")
        .env_remove("RUST_LOG");
    cmd
}

/// A temporary directory holding a `helpbot.toml`, plus anything else a test writes.
pub struct Sandbox {
    pub dir: TempDir,
    pub config: PathBuf,
}

impl Sandbox {
    /// Sandbox whose configuration file contains `toml` (may be empty for defaults).
    pub fn with_config(toml: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = dir.path().join("helpbot.toml");
        fs::write(&config, toml).expect("Failed to write test config");
        Self { dir, config }
    }

    /// Sandbox with default configuration and no thinking delay.
    pub fn instant() -> Self {
        Self::with_config("[responder]\nthinking_delay_ms = 0\n")
    }

    /// Writes `content` to `name` inside the sandbox and returns its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write sandbox file");
        path
    }

    /// `helpbot --config <sandbox config>`, run from inside the sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = helpbot_cmd();
        cmd.current_dir(self.dir.path()).arg("--config").arg(&self.config);
        cmd
    }
}
