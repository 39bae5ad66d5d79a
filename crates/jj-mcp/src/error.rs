//! Error types for the MCP server

use std::path::PathBuf;

use thiserror::Error;

use crate::params::ValidationError;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during MCP server operations
///
/// Failures of `jj` itself are not represented here: they are part of a
/// normal tool result and reach the caller as error text.
#[derive(Debug, Error)]
pub enum Error {
    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error on the transport
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be read or parsed
    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// Tool arguments failed validation
    #[error("invalid arguments: {0}")]
    Validation(#[from] ValidationError),

    /// Unknown tool requested
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Request params of the wrong shape
    #[error("invalid params: {0}")]
    InvalidParams(String),
}

impl Error {
    /// JSON-RPC error code used when this error is reported to the client
    pub fn code(&self) -> i32 {
        match self {
            Error::Validation(_) | Error::UnknownTool(_) | Error::InvalidParams(_) => -32602,
            _ => -32603,
        }
    }
}
