//! # Helpbot Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the configuration system for Helpbot, handling loading,
//! merging, validation, and access to configuration data. It supports a multi-level
//! configuration approach that combines defaults, user settings, project-specific
//! overrides and command-line flags.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (`--delay-ms`, `--match-mode`, `--turn-order`, `--knowledge-base`)
//! 2. An explicit file given with `--config` / `HELPBOT_CONFIG` (replaces 3 and 4)
//! 3. Project-specific `.helpbot.toml` in current directory or ancestors
//! 4. User-specific `<config dir>/helpbot/config.toml`
//! 5. Default values defined in the code
//!
//! After merging, paths are expanded (`~` to home directory) and the result is
//! validated before any command uses it.
//!
//! ## Examples
//!
//! Configuration file format:
//!
//! ```toml
//! [responder]
//! thinking_delay_ms = 800
//! match_mode = "substring"     # or "word"
//! turn_order = "completion"    # or "submission"
//! knowledge_base = "~/helpbot/kb.toml"
//!
//! [fallback]
//! prompts = ["I'm not sure about that. Could you rephrase your question?"]
//! example_queries = ["How do I upload a paper?"]
//!
//! [links]
//! base_url = "https://research.example.org"
//!
//! [server]
//! port = 8000
//! host = "127.0.0.1"
//! enable_cors = true
//! ```
//!
//! Loading and using configuration:
//!
//! ```rust
//! let cfg = config::load_config(args.config.as_deref(), &args.responder.overrides())?;
//! let delay = cfg.responder.thinking_delay();
//! ```
//!
use crate::bot::builtin;
use crate::bot::matcher::MatchMode;
use crate::bot::pipeline::TurnOrder;
use crate::core::error::{HelpbotError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::IpAddr;
use std::time::Duration;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Upper bound for `responder.thinking_delay_ms`.
pub const MAX_THINKING_DELAY_MS: u64 = 60_000;

/// The resolved configuration every command works from.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    pub responder: ResponderConfig,
    pub fallback: FallbackConfig,
    pub links: LinksConfig,
    pub server: ServerSection,
}

/// How replies are produced and scheduled.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponderConfig {
    /// Artificial "thinking" delay before each bot reply, in milliseconds.
    pub thinking_delay_ms: u64,
    /// Substring (default) or word-boundary trigger matching.
    pub match_mode: MatchMode,
    /// Whether bot turns append in completion order or strictly in submission order.
    pub turn_order: TurnOrder,
    /// Optional knowledge base TOML file (can use ~). The built-in table is used when unset.
    pub knowledge_base: Option<String>,
}

/// Replies used when no rule matches.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackConfig {
    /// Default prompts; one is chosen at random per unmatched input. Must not be empty.
    pub prompts: Vec<String>,
    /// Suggestions appended to every fallback reply, also offered as quick replies.
    pub example_queries: Vec<String>,
}

/// One configuration file as written. Every key is optional so that layers can be
/// stacked: a key set in a higher layer wins even when it equals the default.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
pub struct ConfigFile {
    #[serde(default)]
    pub responder: ResponderSection,
    #[serde(default)]
    pub fallback: FallbackSection,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub server: ServerSection,
}

/// `[responder]` as written in a file.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ResponderSection {
    pub thinking_delay_ms: Option<u64>,
    pub match_mode: Option<MatchMode>,
    pub turn_order: Option<TurnOrder>,
    pub knowledge_base: Option<String>,
}

/// `[fallback]` as written in a file.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FallbackSection {
    pub prompts: Option<Vec<String>>,
    pub example_queries: Option<Vec<String>>,
}

/// How link targets are presented.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LinksConfig {
    /// Site root joined to relative link targets (e.g. `https://research.example.org`).
    pub base_url: Option<String>,
}

/// Defaults for `helpbot srv`; command-line flags take precedence.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub enable_cors: Option<bool>,
}

/// Command-line overrides applied on top of the loaded files.
#[derive(Debug, Default, Clone)]
pub struct ResponderOverrides {
    pub thinking_delay_ms: Option<u64>,
    pub match_mode: Option<MatchMode>,
    pub turn_order: Option<TurnOrder>,
    pub knowledge_base: Option<String>,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: default_thinking_delay_ms(),
            match_mode: MatchMode::default(),
            turn_order: TurnOrder::default(),
            knowledge_base: None,
        }
    }
}

impl ResponderConfig {
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            prompts: default_prompts(),
            example_queries: default_example_queries(),
        }
    }
}

impl ConfigFile {
    /// Keeps every key set in `self` and takes the rest from `lower`.
    fn layered_over(self, lower: ConfigFile) -> ConfigFile {
        ConfigFile {
            responder: ResponderSection {
                thinking_delay_ms: self
                    .responder
                    .thinking_delay_ms
                    .or(lower.responder.thinking_delay_ms),
                match_mode: self.responder.match_mode.or(lower.responder.match_mode),
                turn_order: self.responder.turn_order.or(lower.responder.turn_order),
                knowledge_base: self
                    .responder
                    .knowledge_base
                    .or(lower.responder.knowledge_base),
            },
            fallback: FallbackSection {
                prompts: self.fallback.prompts.or(lower.fallback.prompts),
                example_queries: self
                    .fallback
                    .example_queries
                    .or(lower.fallback.example_queries),
            },
            links: LinksConfig {
                base_url: self.links.base_url.or(lower.links.base_url),
            },
            server: ServerSection {
                port: self.server.port.or(lower.server.port),
                host: self.server.host.or(lower.server.host),
                enable_cors: self.server.enable_cors.or(lower.server.enable_cors),
            },
        }
    }

    /// Fills unset keys with the built-in defaults.
    fn resolve(self) -> Config {
        let responder = self.responder;
        let fallback = self.fallback;
        Config {
            responder: ResponderConfig {
                thinking_delay_ms: responder
                    .thinking_delay_ms
                    .unwrap_or_else(default_thinking_delay_ms),
                match_mode: responder.match_mode.unwrap_or_default(),
                turn_order: responder.turn_order.unwrap_or_default(),
                knowledge_base: responder.knowledge_base,
            },
            fallback: FallbackConfig {
                prompts: fallback.prompts.unwrap_or_else(default_prompts),
                example_queries: fallback
                    .example_queries
                    .unwrap_or_else(default_example_queries),
            },
            links: self.links,
            server: self.server,
        }
    }
}

impl ResponderOverrides {
    fn apply(&self, config: &mut Config) {
        if let Some(ms) = self.thinking_delay_ms {
            debug!("Overriding thinking delay from command line: {}ms", ms);
            config.responder.thinking_delay_ms = ms;
        }
        if let Some(mode) = self.match_mode {
            config.responder.match_mode = mode;
        }
        if let Some(order) = self.turn_order {
            config.responder.turn_order = order;
        }
        if let Some(path) = &self.knowledge_base {
            config.responder.knowledge_base = Some(path.clone());
        }
    }
}

fn default_thinking_delay_ms() -> u64 {
    800
}
fn default_prompts() -> Vec<String> {
    builtin::DEFAULT_PROMPTS.iter().map(|s| s.to_string()).collect()
}
fn default_example_queries() -> Vec<String> {
    builtin::EXAMPLE_QUERIES.iter().map(|s| s.to_string()).collect()
}

const PROJECT_CONFIG_FILENAME: &str = ".helpbot.toml";

/// Loads, merges, overrides, expands and validates the configuration.
///
/// With `explicit` set, only that file is read (it must exist); otherwise the user
/// and project files are merged.
pub fn load_config(explicit: Option<&Path>, overrides: &ResponderOverrides) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?.resolve()
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config, project_config)
        }
    };
    overrides.apply(&mut config);
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<ConfigFile>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Helpbot", "helpbot") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<ConfigFile>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!(
            "No project configuration file (.helpbot.toml) found in current directory or ancestors."
        );
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root, stopping at the first `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path: &Path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project keys win over user keys; anything neither file sets gets its default.
fn merge_configs(user: Option<ConfigFile>, project: Option<ConfigFile>) -> Config {
    let user = user.unwrap_or_default();
    match project {
        Some(project) => project.layered_over(user).resolve(),
        None => user.resolve(),
    }
}

fn expand_config_paths(config: &mut Config) {
    if let Some(kb) = config.responder.knowledge_base.as_mut() {
        *kb = shellexpand::tilde(kb).into_owned();
        debug!("Expanded knowledge base path: {}", kb);
    }
    if let Some(base) = config.links.base_url.as_mut() {
        let trimmed = base.trim_end_matches('/').to_string();
        *base = trimmed;
    }
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if config.responder.thinking_delay_ms > MAX_THINKING_DELAY_MS {
        return Err(anyhow!(HelpbotError::Config(format!(
            "thinking_delay_ms is {} but must be at most {}.",
            config.responder.thinking_delay_ms, MAX_THINKING_DELAY_MS
        ))));
    }
    if config.fallback.prompts.is_empty() {
        return Err(anyhow!(HelpbotError::EmptyFallback));
    }
    if config.fallback.prompts.iter().any(|p| p.trim().is_empty()) {
        return Err(anyhow!(HelpbotError::Config(
            "Fallback prompts cannot be blank.".to_string()
        )));
    }
    if config
        .fallback
        .example_queries
        .iter()
        .any(|q| q.trim().is_empty())
    {
        return Err(anyhow!(HelpbotError::Config(
            "Fallback example queries cannot be blank.".to_string()
        )));
    }
    if let Some(kb) = &config.responder.knowledge_base {
        let kb_path = PathBuf::from(kb);
        if !kb_path.is_file() {
            return Err(anyhow!(HelpbotError::Config(format!(
                "Configured knowledge base '{}' does not exist or is not a file.",
                kb_path.display()
            ))));
        }
    }
    if let Some(base) = &config.links.base_url {
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(anyhow!(HelpbotError::Config(format!(
                "Invalid links.base_url '{}'. Expected an http:// or https:// URL.",
                base
            ))));
        }
    }
    if let Some(host) = &config.server.host {
        if host.parse::<IpAddr>().is_err() {
            return Err(anyhow!(HelpbotError::Config(format!(
                "Invalid server.host '{}'. Expected an IP address.",
                host
            ))));
        }
    }
    info!("Configuration validation successful.");
    Ok(())
}
