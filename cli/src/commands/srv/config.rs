//! # Helpbot HTTP Server Configuration
//!
//! File: cli/src/commands/srv/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module resolves the network settings for `helpbot srv`. It combines:
//! 1. Command-line arguments (highest priority)
//! 2. The `[server]` section of the loaded Helpbot configuration
//! 3. Default values (lowest priority)
//!
//! Responder settings (delay, match mode, knowledge base) are not handled here:
//! they come from `core::config` like every other command.
//!
//! ## Examples
//!
//! Configuration file section:
//!
//! ```toml
//! [server]
//! port = 9000
//! host = "0.0.0.0"
//! enable_cors = false
//! ```
//!
//! Merging:
//!
//! ```rust
//! let cfg = config::load_config(config_path, &args.responder.overrides())?;
//! let server_config = merge_server_config(&args, &cfg.server)?;
//! println!("Listening on: {}:{}", server_config.host, server_config.port);
//! ```
//!
use crate::commands::ResponderArgs;
use crate::core::config::ServerSection;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr};
use tracing::debug;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// # Server Command Arguments (`SrvArgs`)
///
/// Defines the command-line arguments accepted by `helpbot srv`. Values left at
/// their defaults can be overridden by the `[server]` section of the
/// configuration file; values changed on the command line always win.
#[derive(Parser, Debug)]
pub struct SrvArgs {
    /// Sets the network port the server will listen on.
    /// If it is taken, the next free port is used.
    #[arg(long, short, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Sets the network IP address the server will bind to.
    /// Use `0.0.0.0` to accept connections from other machines.
    #[arg(long, default_value_t = DEFAULT_HOST)]
    pub host: IpAddr,

    /// Disables Cross-Origin Resource Sharing (CORS) headers.
    /// By default, CORS is enabled so a widget on another origin can call the API.
    #[arg(long)]
    pub no_cors: bool,

    #[command(flatten)]
    pub responder: ResponderArgs,
}

/// # Effective Server Configuration (`ServerConfig`)
///
/// The network settings the server logic uses after merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub host: IpAddr,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST,
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    fn from_args(args: &SrvArgs) -> Self {
        Self {
            port: args.port,
            host: args.host,
            enable_cors: !args.no_cors,
        }
    }
}

/// # Merge Server Configuration (`merge_server_config`)
///
/// Starts from the command-line arguments and fills in values from the
/// `[server]` section wherever the argument was left at its default.
/// `--no-cors` always wins over the file.
///
/// ## Errors
///
/// Returns an error if `server.host` is not an IP address. `core::config`
/// already rejects that at load time, so this only guards direct callers.
pub fn merge_server_config(args: &SrvArgs, section: &ServerSection) -> Result<ServerConfig> {
    let mut effective = ServerConfig::from_args(args);

    if args.port == DEFAULT_PORT {
        if let Some(port) = section.port {
            debug!("Using port {} from [server] config", port);
            effective.port = port;
        }
    }
    if args.host == DEFAULT_HOST {
        if let Some(host) = &section.host {
            effective.host = host
                .parse()
                .with_context(|| format!("Invalid server.host '{}'", host))?;
            debug!("Using host {} from [server] config", effective.host);
        }
    }
    if !args.no_cors {
        if let Some(enable_cors) = section.enable_cors {
            effective.enable_cors = enable_cors;
        }
    }

    Ok(effective)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> SrvArgs {
        let mut full = vec!["srv"];
        full.extend_from_slice(argv);
        SrvArgs::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(config.enable_cors);
    }

    #[test]
    fn test_from_args() {
        let config = ServerConfig::from_args(&args(&["--port", "9000", "--host", "0.0.0.0", "--no-cors"]));
        assert_eq!(config.port, 9000);
        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert!(!config.enable_cors);
    }

    #[test]
    fn test_file_fills_defaulted_args() {
        let section = ServerSection {
            port: Some(9090),
            host: Some("0.0.0.0".into()),
            enable_cors: Some(false),
        };
        let config = merge_server_config(&args(&[]), &section).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert!(!config.enable_cors);
    }

    #[test]
    fn test_cli_overrides_file() {
        let section = ServerSection {
            port: Some(9001),
            host: Some("192.168.1.1".into()),
            enable_cors: Some(true),
        };
        let config =
            merge_server_config(&args(&["-p", "9999", "--host", "10.0.0.1", "--no-cors"]), &section)
                .unwrap();
        assert_eq!(config.port, 9999);
        assert_eq!(config.host.to_string(), "10.0.0.1");
        assert!(!config.enable_cors);
    }

    #[test]
    fn test_empty_section_keeps_args() {
        let config = merge_server_config(&args(&["--port", "8080"]), &ServerSection::default()).unwrap();
        assert_eq!(config, ServerConfig { port: 8080, ..ServerConfig::default() });
    }

    #[test]
    fn test_invalid_host_in_section() {
        let section = ServerSection {
            host: Some("not-an-ip".into()),
            ..ServerSection::default()
        };
        assert!(merge_server_config(&args(&[]), &section).is_err());
    }
}
