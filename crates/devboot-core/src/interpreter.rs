//! Python interpreter discovery.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{BootstrapError, BootstrapResult};

/// Interpreter commands probed, in preference order.
const CANDIDATES: [&str; 2] = ["python3", "python"];

/// A resolved Python interpreter.
///
/// Chosen once at startup; the path is absolute and immutable thereafter.
#[derive(Debug, Clone)]
pub struct Interpreter {
    path: PathBuf,
}

impl Interpreter {
    /// Probe the process search path for `python3`, then `python`.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::MissingInterpreter`] if neither command
    /// resolves to an executable.
    pub fn detect() -> BootstrapResult<Self> {
        for candidate in CANDIDATES {
            if let Ok(path) = which::which(candidate) {
                debug!("resolved `{candidate}` to {}", path.display());
                return Ok(Self { path });
            }
        }
        Err(BootstrapError::MissingInterpreter)
    }

    /// Probe an explicit `PATH` value instead of the process environment.
    ///
    /// This is the deterministic variant [`Interpreter::detect`] delegates
    /// its semantics to; tests use it to simulate hosts with and without an
    /// interpreter installed.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::MissingInterpreter`] if neither candidate
    /// resolves within `path_var`.
    pub fn detect_in(path_var: impl AsRef<OsStr>, cwd: &Path) -> BootstrapResult<Self> {
        for candidate in CANDIDATES {
            if let Ok(path) = which::which_in(candidate, Some(path_var.as_ref()), cwd) {
                debug!("resolved `{candidate}` to {}", path.display());
                return Ok(Self { path });
            }
        }
        Err(BootstrapError::MissingInterpreter)
    }

    /// Create from an explicit executable path (useful for testing).
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Absolute path to the interpreter executable.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `<python> --version` and return the trimmed output.
    ///
    /// The version banner lands on stdout on modern interpreters and on
    /// stderr on old ones; whichever stream is non-empty wins.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::ToolFailed`] if the interpreter exits
    /// non-zero, or [`BootstrapError::Io`] if it cannot be spawned.
    pub fn version(&self) -> BootstrapResult<String> {
        let output = Command::new(&self.path).arg("--version").output()?;

        if !output.status.success() {
            return Err(BootstrapError::tool_failed("python --version", output.status));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let banner = if stdout.trim().is_empty() {
            String::from_utf8_lossy(&output.stderr).trim().to_string()
        } else {
            stdout.trim().to_string()
        };
        Ok(banner)
    }
}
