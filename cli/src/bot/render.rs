//! # Helpbot Render Port
//!
//! File: cli/src/bot/render.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The pipeline never prints anything itself. It drives a `RenderPort`, a small
//! capability set supplied by whichever front end owns the session:
//! - `append_turn`: display a user or bot turn
//! - `show_composing` / `hide_composing`: toggle the "bot is typing" indicator
//!
//! Each reply calls `show_composing` and `hide_composing` exactly once. With
//! overlapping submissions several replies can be composing at the same time, so
//! ports that draw a single indicator should count them.
//!
//! This module also provides `TerminalPort` (used by `chat` and `ask`) and the
//! presentation helpers shared with the HTTP API: line-break conversion and link
//! target resolution.
//!
use super::conversation::{Role, Turn};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Display surface driven by the response pipeline.
pub trait RenderPort: Send + Sync {
    fn append_turn(&self, turn: &Turn);
    fn show_composing(&self);
    fn hide_composing(&self);
}

/// Joins a link target to the configured site root. Absolute URLs pass through.
pub fn resolve_target(base_url: Option<&str>, target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        return target.to_string();
    }
    match base_url {
        Some(base) if target.starts_with('/') => format!("{}{}", base, target),
        Some(base) => format!("{}/{}", base, target),
        None => target.to_string(),
    }
}

/// Escapes markup and turns newlines into `<br>`.
pub fn to_html(text: &str) -> String {
    let mut html = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => html.push_str("&amp;"),
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            '"' => html.push_str("&quot;"),
            '\'' => html.push_str("&#39;"),
            '\n' => html.push_str("<br>"),
            other => html.push(other),
        }
    }
    html
}

/// Spinner bookkeeping for overlapping replies.
#[derive(Default)]
struct ComposingState {
    pending: usize,
    spinner: Option<ProgressBar>,
}

/// Renders turns on stdout and the composing indicator as a spinner on stderr.
pub struct TerminalPort {
    base_url: Option<String>,
    echo_user: bool,
    composing: Mutex<ComposingState>,
}

const BOT_PREFIX: &str = "Bot: ";
const CONTINUATION: &str = "     ";

impl TerminalPort {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url,
            echo_user: false,
            composing: Mutex::new(ComposingState::default()),
        }
    }

    /// Also print user turns. Off by default, since the terminal already shows what was typed.
    pub fn echo_user(mut self, echo: bool) -> Self {
        self.echo_user = echo;
        self
    }

    /// The exact text printed for a turn, or `None` for a suppressed user echo.
    pub fn format_turn(&self, turn: &Turn) -> Option<String> {
        match turn.role {
            Role::User if !self.echo_user => None,
            Role::User => Some(format!("You: {}", turn.text)),
            Role::Bot => {
                let mut lines = Vec::new();
                for (i, line) in turn.text.split('\n').enumerate() {
                    let prefix = if i == 0 { BOT_PREFIX } else { CONTINUATION };
                    if line.is_empty() {
                        lines.push(String::new());
                    } else {
                        lines.push(format!("{}{}", prefix, line));
                    }
                }
                for link in &turn.links {
                    lines.push(format!(
                        "{}→ {}: {}",
                        CONTINUATION,
                        link.label,
                        resolve_target(self.base_url.as_deref(), &link.target)
                    ));
                }
                Some(lines.join("\n"))
            }
        }
    }

    fn state(&self) -> MutexGuard<'_, ComposingState> {
        self.composing.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RenderPort for TerminalPort {
    fn append_turn(&self, turn: &Turn) {
        let Some(text) = self.format_turn(turn) else {
            return;
        };
        let state = self.state();
        match &state.spinner {
            // Another reply is still composing; print around the spinner line.
            Some(spinner) => spinner.suspend(|| println!("{}\n", text)),
            None => println!("{}\n", text),
        }
    }

    fn show_composing(&self) {
        let mut state = self.state();
        state.pending += 1;
        if state.spinner.is_none() {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                spinner.set_style(style);
            }
            spinner.set_message("Bot is typing...");
            spinner.enable_steady_tick(Duration::from_millis(120));
            state.spinner = Some(spinner);
        }
    }

    fn hide_composing(&self) {
        let mut state = self.state();
        state.pending = state.pending.saturating_sub(1);
        if state.pending == 0 {
            if let Some(spinner) = state.spinner.take() {
                spinner.finish_and_clear();
            }
        }
    }
}

/// In-memory port for tests: records every call in order.
#[cfg(test)]
pub mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum PortEvent {
        Turn(Turn),
        Show,
        Hide,
    }

    #[derive(Default)]
    pub struct RecordingPort {
        events: Mutex<Vec<PortEvent>>,
    }

    impl RecordingPort {
        pub fn events(&self) -> Vec<PortEvent> {
            self.events.lock().unwrap().clone()
        }

        pub fn count(&self, wanted: &PortEvent) -> usize {
            self.events().iter().filter(|e| *e == wanted).count()
        }

        fn push(&self, event: PortEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl RenderPort for RecordingPort {
        fn append_turn(&self, turn: &Turn) {
            self.push(PortEvent::Turn(turn.clone()));
        }
        fn show_composing(&self) {
            self.push(PortEvent::Show);
        }
        fn hide_composing(&self) {
            self.push(PortEvent::Hide);
        }
    }
}
