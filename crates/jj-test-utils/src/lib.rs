//! Shared test utilities for the jj-mcp workspace.
//!
//! Tests never need a real `jj` installation. [`FakeJj`] writes a small
//! shell script into a temporary directory and hands out its path, so the
//! server can be pointed at it in place of the real program. Scripts are
//! POSIX `sh`; callers gate their tests on `#[cfg(unix)]`.
//!
//! This crate is a dev-dependency only and is never published.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A fake `jj` executable living in its own temporary directory
pub struct FakeJj {
    dir: TempDir,
    path: PathBuf,
}

impl FakeJj {
    /// Prints each argument on its own line, then exits 0.
    ///
    /// The captured output is therefore `args.join("\n")`.
    pub fn echo_args() -> Self {
        Self::with_script(r#"for arg in "$@"; do printf '%s\n' "$arg"; done"#)
    }

    /// Prints the directory it was started in, then exits 0.
    pub fn print_cwd() -> Self {
        Self::with_script(r#"pwd -P"#)
    }

    /// Writes `stderr` to standard error and exits with `code`.
    pub fn failing(stderr: &str, code: i32) -> Self {
        let escaped = stderr.replace('\'', r#"'\''"#);
        Self::with_script(&format!("printf '%s\\n' '{escaped}' >&2\nexit {code}"))
    }

    /// A fake whose body is the given shell snippet.
    ///
    /// # Panics
    /// Panics if the script cannot be written or made executable.
    pub fn with_script(body: &str) -> Self {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("FakeJj: failed to create temp dir: {e}"));
        let path = dir.path().join("jj");
        fs::write(&path, format!("#!/bin/sh\n{body}\n"))
            .unwrap_or_else(|e| panic!("FakeJj: failed to write script: {e}"));
        make_executable(&path);
        Self { dir, path }
    }

    /// Path to the script
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path to the script as a program name
    pub fn program(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// Directory holding the script; doubles as a scratch working directory
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .unwrap_or_else(|e| panic!("FakeJj: failed to chmod {}: {e}", path.display()));
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

/// Split the output of [`FakeJj::echo_args`] back into argument tokens.
pub fn echoed_args(output: &str) -> Vec<String> {
    if output.is_empty() {
        return Vec::new();
    }
    output.lines().map(str::to_string).collect()
}
