//! Subprocess execution for `jj`
//!
//! This module runs the external program, captures its output and
//! normalizes the result. It never panics and never lets an I/O error
//! escape untyped: every way a run can go wrong becomes a [`JjError`].

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::args::JjArgs;
use crate::error::{ExitKind, JjError, Result};

/// A single run of the external program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to execute, resolved through `PATH` when not absolute
    pub program: String,
    /// Argument tokens, in order
    pub args: Vec<String>,
    /// Working directory override; the caller's directory when `None`
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    /// Create an invocation from built arguments
    pub fn new(program: impl Into<String>, args: impl Into<Vec<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into(),
            cwd: None,
        }
    }

    /// Convenience constructor taking a [`JjArgs`] builder
    pub fn jj(program: impl Into<String>, args: JjArgs) -> Self {
        Self::new(program, args.into_vec())
    }

    /// Spawn the process in `cwd` instead of the caller's directory
    pub fn with_cwd(mut self, cwd: Option<PathBuf>) -> Self {
        self.cwd = cwd;
        self
    }
}

/// Something that can execute an [`Invocation`]
///
/// On success the result is the program's stdout with leading and trailing
/// whitespace removed.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<String>;
}

/// Runs invocations as real child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Create a runner that waits indefinitely for the child to exit
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill the child and fail the invocation after `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<String> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &invocation.cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!(
            program = %invocation.program,
            args = ?invocation.args,
            cwd = ?invocation.cwd,
            "Running command"
        );

        let child = cmd.spawn().map_err(|source| JjError::Spawn {
            program: invocation.program.clone(),
            cwd: invocation.cwd.clone(),
            source,
        })?;
        let wait_error = |source| JjError::Wait {
            program: invocation.program.clone(),
            source,
        };

        let output = match self.timeout {
            Some(after) => {
                match tokio::time::timeout(after, child.wait_with_output()).await {
                    Ok(output) => output.map_err(wait_error)?,
                    Err(_) => {
                        tracing::warn!(program = %invocation.program, ?after, "Command timed out");
                        return Err(JjError::TimedOut {
                            program: invocation.program.clone(),
                            after,
                        });
                    }
                }
            }
            None => child.wait_with_output().await.map_err(wait_error)?,
        };

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let status = exit_kind(output.status);
            tracing::warn!(program = %invocation.program, %status, "Command failed");
            Err(JjError::Failed {
                program: invocation.program.clone(),
                status,
                stderr,
            })
        }
    }
}

fn exit_kind(status: ExitStatus) -> ExitKind {
    if let Some(code) = status.code() {
        return ExitKind::Code(code);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return ExitKind::Signal(signal);
        }
    }
    ExitKind::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_from_builder() {
        let inv = Invocation::jj("jj", JjArgs::new(&["status"]).positionals(&["a.txt"]));
        assert_eq!(inv.program, "jj");
        assert_eq!(inv.args, vec!["status", "a.txt"]);
        assert!(inv.cwd.is_none());
    }

    #[test]
    fn invocation_with_cwd() {
        let inv = Invocation::new("jj", vec!["log".to_string()])
            .with_cwd(Some(PathBuf::from("/tmp")));
        assert_eq!(inv.cwd, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn runner_timeout_defaults_to_none() {
        assert!(ProcessRunner::new().timeout().is_none());
        let runner = ProcessRunner::new().with_timeout(Some(Duration::from_secs(5)));
        assert_eq!(runner.timeout(), Some(Duration::from_secs(5)));
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_failure() {
        let inv = Invocation::new("definitely-not-a-real-program-7f3a", Vec::<String>::new());
        let err = ProcessRunner::new().run(&inv).await.unwrap_err();
        assert!(err.is_spawn_failure());
        assert!(err.to_string().contains("definitely-not-a-real-program-7f3a"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn success_trims_only_outer_whitespace() {
        let inv = Invocation::new(
            "sh",
            vec!["-c".to_string(), "printf '\\n  a  b\\n\\tc  \\n\\n'".to_string()],
        );
        let out = ProcessRunner::new().run(&inv).await.unwrap();
        assert_eq!(out, "a  b\n\tc");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failure_carries_trimmed_stderr_and_code() {
        let inv = Invocation::new(
            "sh",
            vec!["-c".to_string(), "echo '  bad revision  ' >&2; exit 2".to_string()],
        );
        let err = ProcessRunner::new().run(&inv).await.unwrap_err();
        assert_eq!(err.exit_kind(), Some(ExitKind::Code(2)));
        assert_eq!(err.to_string(), "bad revision");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn signal_termination_is_reported() {
        let inv = Invocation::new("sh", vec!["-c".to_string(), "kill -9 $$".to_string()]);
        let err = ProcessRunner::new().run(&inv).await.unwrap_err();
        assert_eq!(err.exit_kind(), Some(ExitKind::Signal(9)));
        assert_eq!(err.to_string(), "sh terminated by signal 9");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn timeout_kills_slow_child() {
        let inv = Invocation::new("sh", vec!["-c".to_string(), "sleep 10".to_string()]);
        let runner = ProcessRunner::new().with_timeout(Some(Duration::from_millis(100)));
        let err = runner.run(&inv).await.unwrap_err();
        assert!(matches!(err, JjError::TimedOut { .. }));
    }
}
