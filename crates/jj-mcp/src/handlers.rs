//! MCP tool call handling
//!
//! The [`Dispatcher`] ties the pieces together for one `tools/call`:
//! registry lookup, parameter validation, argument building and running
//! `jj`. Caller mistakes (unknown tool, bad arguments) come back as
//! [`Error`]s and become JSON-RPC errors; anything that happens once `jj`
//! is being run comes back as a [`ToolResult`], with `isError` set when
//! the run failed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use jj_exec::{CommandRunner, Invocation, JjError};
use serde_json::Value;

use crate::tools::{CWD_PARAM, ToolRegistry, ToolResult};
use crate::{Error, Result};

/// Dispatches tool calls to `jj`
pub struct Dispatcher {
    registry: ToolRegistry,
    runner: Arc<dyn CommandRunner>,
    program: String,
    default_cwd: Option<PathBuf>,
}

impl Dispatcher {
    /// Create a dispatcher over a fixed registry
    ///
    /// # Arguments
    ///
    /// * `registry` - The tools to expose
    /// * `runner` - Executes the built invocations
    /// * `program` - The `jj` executable
    /// * `default_cwd` - Where `jj` runs when a call gives no `cwd`
    pub fn new(
        registry: ToolRegistry,
        runner: Arc<dyn CommandRunner>,
        program: impl Into<String>,
        default_cwd: Option<PathBuf>,
    ) -> Self {
        Self {
            registry,
            runner,
            program: program.into(),
            default_cwd,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Validate a call and turn it into an [`Invocation`] without running it
    pub fn prepare(&self, tool_name: &str, arguments: &Value) -> Result<Invocation> {
        let tool = self
            .registry
            .get(tool_name)
            .ok_or_else(|| Error::UnknownTool(tool_name.to_string()))?;
        let params = tool.validate(arguments)?;
        let cwd = resolve_cwd(self.default_cwd.as_deref(), params.str(CWD_PARAM));

        Ok(Invocation::new(self.program.clone(), tool.args(&params)).with_cwd(cwd))
    }

    /// Handle a tool call end to end
    pub async fn call(&self, tool_name: &str, arguments: &Value) -> Result<ToolResult> {
        let invocation = self.prepare(tool_name, arguments)?;

        tracing::debug!(tool = tool_name, args = ?invocation.args, "Calling tool");

        match self.runner.run(&invocation).await {
            Ok(output) => Ok(ToolResult::text(output)),
            Err(e) => {
                tracing::warn!(tool = tool_name, error = %e, "Tool failed");
                Ok(ToolResult::error(error_text(&e)))
            }
        }
    }
}

/// Caller-facing text for a failed run
///
/// `jj` already prefixes its own diagnostics with `Error:`; those are passed
/// through as they are.
fn error_text(error: &JjError) -> String {
    let message = error.to_string();
    if message.starts_with("Error:") {
        message
    } else {
        format!("Error: {}", message)
    }
}

/// Working directory for a call
///
/// A relative `cwd` is taken relative to the server's default directory.
fn resolve_cwd(default: Option<&Path>, requested: Option<&str>) -> Option<PathBuf> {
    match (default, requested) {
        (_, None) => default.map(Path::to_path_buf),
        (Some(base), Some(dir)) => Some(base.join(dir)),
        (None, Some(dir)) => Some(PathBuf::from(dir)),
    }
}
