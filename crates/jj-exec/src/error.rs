//! Error types for jj invocations

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Result type alias for jj invocations
pub type Result<T> = std::result::Result<T, JjError>;

/// How a failed process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitKind {
    /// Exited with a non-zero status code
    Code(i32),
    /// Terminated by a signal (unix only)
    Signal(i32),
    /// Neither a code nor a signal was reported
    Unknown,
}

impl fmt::Display for ExitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitKind::Code(code) => write!(f, "exited with status {}", code),
            ExitKind::Signal(signal) => write!(f, "terminated by signal {}", signal),
            ExitKind::Unknown => write!(f, "exited abnormally"),
        }
    }
}

/// Errors that can occur while running `jj`
///
/// The `Display` output is what callers ultimately see, so it carries the
/// program's own diagnostic whenever there is one.
#[derive(Debug, thiserror::Error)]
pub enum JjError {
    /// The program could not be started at all
    #[error("{}: {source}", spawn_message(.program, .cwd.as_deref()))]
    Spawn {
        program: String,
        cwd: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// The program started but its output could not be collected
    #[error("lost contact with `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and reported failure
    #[error("{}", failure_message(.program, .status, .stderr))]
    Failed {
        program: String,
        status: ExitKind,
        stderr: String,
    },

    /// The program did not finish within the configured timeout
    #[error("`{program}` did not finish within {after:?}")]
    TimedOut { program: String, after: Duration },
}

impl JjError {
    /// Exit status of a failed run, if the program got that far
    pub fn exit_kind(&self) -> Option<ExitKind> {
        match self {
            JjError::Failed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the program never started
    pub fn is_spawn_failure(&self) -> bool {
        matches!(self, JjError::Spawn { .. })
    }
}

fn spawn_message(program: &str, cwd: Option<&Path>) -> String {
    match cwd {
        Some(cwd) => format!("failed to run `{}` in {}", program, cwd.display()),
        None => format!("failed to run `{}`", program),
    }
}

fn failure_message(program: &str, status: &ExitKind, stderr: &str) -> String {
    if stderr.is_empty() {
        format!("{} {}", program, status)
    } else {
        stderr.to_string()
    }
}
