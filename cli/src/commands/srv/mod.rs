//! # Helpbot Chat API Server
//!
//! File: cli/src/commands/srv/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module serves the responder over HTTP so a chat widget on the web
//! platform can use it. It supports:
//! - CORS (Cross-Origin Resource Sharing)
//! - Port binding (with automatic fallback if the port is in use)
//! - Host interface binding
//! - The same responder flags as `chat` and `ask`
//!
//! ## Architecture
//!
//! - `config.rs`: Network settings merged from arguments and `[server]`
//! - `api.rs`: JSON handlers and response shapes
//! - `server_logic.rs`: Router, port selection, serving and shutdown
//!
//! ## Examples
//!
//! ```bash
//! # Serve on the default port
//! helpbot srv
//!
//! # Public interface, no CORS, instant replies
//! helpbot srv --host 0.0.0.0 --port 9000 --no-cors --delay-ms 0
//! ```
//!
//! Server startup flow:
//! 1. Load the Helpbot configuration and build the responder
//! 2. Merge network settings from arguments and the `[server]` section
//! 3. Find an available port and start serving
//!
use crate::bot::responder::Responder;
use crate::core::config as core_config;
use crate::core::error::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub use config::SrvArgs;

/// JSON request handlers.
pub mod api;

/// Handles network configuration merging for the server.
pub mod config;

/// Contains the core Axum-based HTTP server implementation.
pub mod server_logic;

/// # Handle Server Command (`handle_srv`)
///
/// The entry point for `helpbot srv`. Builds the responder from the effective
/// configuration and runs the server until shutdown.
///
/// ## Errors
///
/// Propagates configuration, knowledge base and server startup failures.
pub async fn handle_srv(args: SrvArgs, config_path: Option<&Path>) -> Result<()> {
    info!("Handling srv command with args: {:?}", args);

    let cfg = core_config::load_config(config_path, &args.responder.overrides())?;
    let server_config = config::merge_server_config(&args, &cfg.server)?;
    info!("Effective server config: {:?}", server_config);

    let state = api::AppState {
        responder: Arc::new(Responder::from_config(&cfg)?),
        delay: cfg.responder.thinking_delay(),
        base_url: cfg.links.base_url.clone(),
    };

    server_logic::run_server(server_config, state).await
}
