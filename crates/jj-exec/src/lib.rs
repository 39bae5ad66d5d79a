//! Jujutsu command execution
//!
//! This crate is the only place that knows how `jj` is invoked. It provides:
//!
//! - [`JjArgs`] - a builder that maps optional/required values onto the
//!   `jj` subcommand/flag grammar (`<subcommand> <options> [--] <positionals>`)
//! - [`Invocation`] - a program, its argument tokens and an optional
//!   working directory
//! - [`CommandRunner`] - the seam between the MCP layer and the subprocess,
//!   implemented for real by [`ProcessRunner`]
//!
//! Output is never interpreted: a successful run yields trimmed stdout, a
//! failed one yields a [`JjError`] that keeps its structured cause.

pub mod args;
pub mod error;
pub mod invoke;

pub use args::JjArgs;
pub use error::{ExitKind, JjError, Result};
pub use invoke::{CommandRunner, Invocation, ProcessRunner};
