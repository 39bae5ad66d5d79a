//! Server configuration
//!
//! Configuration is read from `<config dir>/jj-mcp/config.toml` unless a path
//! is given explicitly. Command-line flags override file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for the jj MCP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Server name reported to MCP clients
    #[serde(default = "default_name")]
    pub name: String,

    /// Program invoked for every tool
    #[serde(default = "default_jj")]
    pub jj: String,

    /// Directory `jj` runs in when a call gives no `cwd`
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    /// Kill `jj` after this many seconds; unlimited when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_name() -> String {
    "jj-mcp".to_string()
}

fn default_jj() -> String {
    "jj".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            jj: default_jj(),
            cwd: None,
            timeout_secs: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used if present, otherwise defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Default config file location
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("jj-mcp").join("config.toml"))
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(
        mut self,
        jj: Option<String>,
        cwd: Option<PathBuf>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(jj) = jj {
            self.jj = jj;
        }
        if let Some(cwd) = cwd {
            self.cwd = Some(cwd);
        }
        if let Some(secs) = timeout_secs {
            self.timeout_secs = Some(secs);
        }
        self
    }

    /// Per-invocation timeout; zero means unlimited
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
