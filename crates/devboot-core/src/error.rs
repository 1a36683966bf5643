//! Error types for bootstrap operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while provisioning or launching the environment.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// No Python interpreter was found on the search path.
    #[error("no Python interpreter found (tried `python3` and `python`)")]
    MissingInterpreter,

    /// The dependency manifest does not exist.
    #[error("dependency manifest not found: {}", .path.display())]
    MissingManifest {
        /// Path that was probed for the manifest.
        path: PathBuf,
    },

    /// An invoked external tool exited with a non-zero status.
    #[error("`{tool}` failed{}", .status.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    ToolFailed {
        /// Human-readable name of the tool that failed.
        tool: String,
        /// Exit code, if the process exited normally.
        status: Option<i32>,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BootstrapError {
    /// Build a [`BootstrapError::ToolFailed`] from a tool name and its
    /// exit status.
    #[must_use]
    pub fn tool_failed(tool: impl Into<String>, status: std::process::ExitStatus) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            status: status.code(),
        }
    }
}

/// Result alias for bootstrap operations.
pub type BootstrapResult<T> = Result<T, BootstrapError>;
