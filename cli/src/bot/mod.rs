//! # Helpbot Responder Engine
//!
//! File: cli/src/bot/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module holds everything that decides *what* the bot says and *when* it
//! says it. Front ends (`chat`, `ask`, `srv`) only supply input and a place to
//! draw the result.
//!
//! ## Architecture
//!
//! - `builtin`: The shipped rule table, fallback prompts and example queries
//! - `knowledge`: `Rule`, `Link` and the validated, ordered `KnowledgeBase`
//! - `matcher`: First-hit trigger matching (`substring` or `word` mode)
//! - `fallback`: Random fallback prompt plus the "Try asking" block
//! - `responder`: Matcher + fallback, input text in, `Reply` out
//! - `conversation`: The append-only turn log for one session
//! - `render`: The `RenderPort` trait and the terminal implementation
//! - `pipeline`: Turn-taking with the thinking delay and composing indicator
//!
//! Data flows one way:
//!
//! ```text
//! input -> ResponsePipeline -> (delay) -> Responder -> Matcher | FallbackSelector
//!                 |                                       |
//!                 +-> Conversation + RenderPort <----- Reply
//! ```
//!
pub mod builtin;
pub mod conversation;
pub mod fallback;
pub mod knowledge;
pub mod matcher;
pub mod pipeline;
pub mod render;
pub mod responder;
