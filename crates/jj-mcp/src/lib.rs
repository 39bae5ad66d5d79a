//! MCP Server for Jujutsu
//!
//! This crate exposes `jj` version-control operations via the Model Context
//! Protocol (MCP), so that agentic IDEs can inspect and edit a Jujutsu
//! repository through typed tools instead of free-form shell commands.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client (IDE / agent) ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ jj-mcp (server, tool catalogue, validation) ]
//!        | (argv)
//!        v
//! [ jj-exec (argument building, subprocess) ]
//!        |
//!        +--> [ jj ]
//! ```
//!
//! # Tools
//!
//! Every tool validates its arguments against a declared parameter list,
//! builds a `jj` command line and returns the trimmed output. The catalogue
//! covers:
//! - Inspection (status, log, diff, show, evolog, files, annotate)
//! - Change editing (new, describe, commit, squash, split, rebase, ...)
//! - Bookmarks
//! - Git interop (fetch, push, remotes, init)
//! - The operation log (log, show, restore, undo)

pub mod config;
pub mod error;
pub mod handlers;
pub mod params;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use handlers::Dispatcher;
pub use server::JjMcpServer;
pub use tools::{ToolContent, ToolDefinition, ToolRegistry, ToolResult, ToolSpec, get_tool_definitions};
