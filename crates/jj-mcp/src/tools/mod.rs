//! MCP tool definitions
//!
//! Tools are the only way agents interact with the server. Each tool is a
//! static [`ToolSpec`]: a name, a description, a parameter list and a pure
//! function that turns validated parameters into `jj` arguments.
//!
//! # Tool Categories
//!
//! ## Inspection ([`inspect`])
//! - `jj_status`, `jj_log`, `jj_diff`, `jj_show`, `jj_evolog`
//! - `jj_file_list`, `jj_file_show`, `jj_file_annotate`
//! - `jj_resolve_list`, `jj_workspace_list`
//!
//! ## Change Manipulation ([`changes`])
//! - `jj_new`, `jj_describe`, `jj_commit`, `jj_edit`, `jj_abandon`
//! - `jj_squash`, `jj_split`, `jj_rebase`, `jj_restore`, `jj_duplicate`
//! - `jj_next`, `jj_prev`
//!
//! ## Bookmarks ([`bookmarks`])
//! - `jj_bookmark_list`, `jj_bookmark_create`, `jj_bookmark_set`, `jj_bookmark_move`
//! - `jj_bookmark_delete`, `jj_bookmark_forget`, `jj_bookmark_rename`
//! - `jj_bookmark_track`, `jj_bookmark_untrack`
//!
//! ## Git Interop ([`git`])
//! - `jj_git_fetch`, `jj_git_push`, `jj_git_remote_list`, `jj_git_init`
//!
//! ## Operation Log ([`operations`])
//! - `jj_op_log`, `jj_op_show`, `jj_op_restore`, `jj_undo`
//!
//! Every tool also accepts the common `repository` and `cwd` parameters.

pub mod bookmarks;
pub mod changes;
pub mod git;
pub mod inspect;
pub mod operations;

use jj_exec::JjArgs;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::params::{self, ParamKind, ParamSpec, Params, ValidationError};

/// Parameter selecting an alternate repository, passed as `-R`
pub const REPOSITORY_PARAM: &str = "repository";
/// Parameter selecting the directory `jj` is spawned in
pub const CWD_PARAM: &str = "cwd";

/// Parameters every tool accepts in addition to its own
pub const COMMON_PARAMS: &[ParamSpec] = &[
    ParamSpec::optional(
        REPOSITORY_PARAM,
        ParamKind::Str,
        "Path to the repository to operate on (passed to jj as -R)",
    ),
    ParamSpec::optional(
        CWD_PARAM,
        ParamKind::Str,
        "Directory to run jj in; relative paths resolve against the server's working directory",
    ),
];

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Result from a tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Content types for tool results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: None,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }

    /// The text of the first content block
    pub fn as_text(&self) -> &str {
        match self.content.first() {
            Some(ToolContent::Text { text }) => text,
            None => "",
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }
}

/// Static description of one tool
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    /// Pairs of parameters that may not be supplied together
    pub conflicts: &'static [(&'static str, &'static str)],
    pub build: fn(&Params) -> JjArgs,
}

impl ToolSpec {
    /// Tool parameters followed by [`COMMON_PARAMS`]
    pub fn all_params(&self) -> Vec<ParamSpec> {
        self.params.iter().chain(COMMON_PARAMS).copied().collect()
    }

    /// Validate raw arguments against this tool's parameters
    pub fn validate(&self, arguments: &Value) -> Result<Params, ValidationError> {
        params::validate(&self.all_params(), self.conflicts, arguments)
    }

    /// Build the `jj` argument list, including the repository override
    pub fn args(&self, params: &Params) -> Vec<String> {
        (self.build)(params)
            .repository(params.str(REPOSITORY_PARAM))
            .into_vec()
    }

    /// Protocol-facing definition
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: params::input_schema(&self.all_params()),
        }
    }
}

/// The fixed set of tools a server exposes
///
/// Built once and handed to the dispatcher; nothing registers tools at
/// runtime.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
}

impl ToolRegistry {
    /// A registry over an explicit list of tools
    pub fn new(tools: Vec<ToolSpec>) -> Self {
        Self { tools }
    }

    /// Every tool this crate ships
    pub fn builtin() -> Self {
        let tools = inspect::TOOLS
            .iter()
            .chain(changes::TOOLS)
            .chain(bookmarks::TOOLS)
            .chain(git::TOOLS)
            .chain(operations::TOOLS)
            .copied()
            .collect();
        Self::new(tools)
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn tools(&self) -> &[ToolSpec] {
        &self.tools
    }

    /// Definitions for `tools/list`
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(ToolSpec::definition).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Every tool definition shipped by this crate
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    ToolRegistry::builtin().definitions()
}

/// Diff output formats shared by `jj_diff` and `jj_show`
pub(crate) const DIFF_FORMATS: &[&str] = &[
    "summary",
    "stat",
    "types",
    "name-only",
    "git",
    "color-words",
];

/// Append `--<format>` when a diff format was chosen
pub(crate) fn diff_format(args: JjArgs, params: &Params) -> JjArgs {
    match params.str("format") {
        Some(format) => args.flag(&format!("--{format}"), true),
        None => args,
    }
}
