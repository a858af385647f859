//! # Helpbot Conversation Log
//!
//! File: cli/src/bot/conversation.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A conversation is the ordered, append-only list of turns for one session.
//! It lives in process memory only and disappears with the session.
//!
//! `Conversation` is a cheap, cloneable handle: every clone appends to and reads
//! from the same log. The pipeline keeps one clone for its delayed reply tasks
//! while the front end keeps another for display or inspection.
//!
use super::knowledge::Link;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    /// Navigation affordances; always empty on user turns.
    pub links: Vec<Link>,
    pub at: DateTime<Utc>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            links: Vec::new(),
            at: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>, links: Vec<Link>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
            links,
            at: Utc::now(),
        }
    }
}

/// Shared handle to an append-only turn log.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Arc<Mutex<Vec<Turn>>>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn and runs `then` on it before releasing the log, so any
    /// side effect of `then` happens in the same order as the appends.
    pub fn append_then<R>(&self, turn: Turn, then: impl FnOnce(&Turn) -> R) -> R {
        let mut turns = self.lock();
        turns.push(turn);
        let appended = &turns[turns.len() - 1];
        then(appended)
    }

    /// A copy of every turn so far, in insertion order.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Turn>> {
        // A panic while holding the lock cannot leave a half-pushed turn behind.
        self.turns.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
