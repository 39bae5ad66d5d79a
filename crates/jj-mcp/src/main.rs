//! Jujutsu MCP Server
//!
//! A Model Context Protocol server that exposes `jj` operations as tools.
//!
//! # Usage
//!
//! ```bash
//! jj-mcp [--jj <program>] [--cwd <dir>] [--timeout <secs>] [--config <file>]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `jj_mcp=info`)
//! - `JJ_MCP_JJ`, `JJ_MCP_CWD`, `JJ_MCP_TIMEOUT`, `JJ_MCP_CONFIG`: same as
//!   the flags
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::path::PathBuf;

use clap::Parser;
use jj_mcp::{JjMcpServer, ServerConfig};

/// MCP server for Jujutsu
#[derive(Parser)]
#[command(name = "jj-mcp")]
#[command(about = "MCP server exposing Jujutsu (jj) operations as tools")]
#[command(version)]
struct Args {
    /// Program to run for every tool
    #[arg(long, env = "JJ_MCP_JJ")]
    jj: Option<String>,

    /// Directory jj runs in when a call gives no cwd
    #[arg(long, env = "JJ_MCP_CWD")]
    cwd: Option<PathBuf>,

    /// Kill jj after this many seconds (0 = no limit)
    #[arg(long, env = "JJ_MCP_TIMEOUT")]
    timeout: Option<u64>,

    /// Config file (default: <config dir>/jj-mcp/config.toml)
    #[arg(short, long, env = "JJ_MCP_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout is reserved for the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jj_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match ServerConfig::load(args.config.as_deref()) {
        Ok(config) => config.with_overrides(args.jj, args.cwd, args.timeout),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    tracing::info!(jj = %config.jj, cwd = ?config.cwd, timeout = ?config.timeout(), "Starting jj-mcp server");

    let server = JjMcpServer::new(config);
    server.run().await?;

    Ok(())
}
