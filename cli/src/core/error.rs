//! # Helpbot Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout Helpbot. Domain failures
//! (bad configuration, malformed knowledge base rules, an empty fallback set) are
//! variants of `HelpbotError`; everything else travels as `anyhow::Error` with
//! context attached at the call site.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `HelpbotError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! Two outcomes are *not* errors:
//! - Blank input submitted to the pipeline is a silent no-op.
//! - An input that matches no rule is answered by the fallback selector.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if prompts.is_empty() {
//!     return Err(HelpbotError::EmptyFallback.into());
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read knowledge base: {}", path.display()))?;
//!
//! // Pattern matching on error types
//! match KnowledgeBase::load(&path) {
//!     Err(e) if matches!(e.downcast_ref::<HelpbotError>(), Some(HelpbotError::InvalidRule { .. })) => {
//!         eprintln!("Rule rejected: {}", e);
//!     }
//!     other => { /* ... */ }
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the Helpbot application.
#[derive(Error, Debug)]
pub enum HelpbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid knowledge base rule #{position}: {reason}")]
    InvalidRule { position: usize, reason: String },

    #[error("Fallback prompt set is empty; at least one default prompt is required.")]
    EmptyFallback,

    #[error("Quick reply #{number} does not exist (available: 1-{available}).")]
    UnknownQuickReply { number: usize, available: usize },

    #[error("Quick reply #{number} does not exist: no example queries are configured.")]
    NoQuickReplies { number: usize },

    #[error("Reply task ended before delivering its turn.")]
    ReplyDropped,
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
