//! # Helpbot Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by every command:
//! configuration loading and error management. The responder itself
//! (knowledge base, matcher, fallback, pipeline) lives in `crate::bot`.
//!
//! ## Architecture
//!
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{HelpbotError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
