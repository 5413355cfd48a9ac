//! Command-line interface.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "lexgate", version, about = "Chat gateway for the Vieira Pires legal agents")]
pub struct Cli {
    /// Emit logs as JSON instead of human-readable lines.
    #[arg(long, global = true, env = "LEXGATE_LOG_JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the gateway HTTP server.
    Serve {
        /// Bind address; overrides settings and `GATEWAY_BIND`.
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Open a terminal chat surface against a running gateway.
    Chat {
        /// Gateway base URL.
        #[arg(long, env = "LEXGATE_GATEWAY_URL", default_value = "http://127.0.0.1:3000")]
        gateway: Url,
        /// Agent to bind initially (defaults to the specialist surface's
        /// default agent).
        #[arg(long)]
        agent: Option<String>,
    },
}
