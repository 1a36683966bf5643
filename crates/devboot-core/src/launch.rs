//! Explicit launch configuration for child processes.
//!
//! Instead of mutating the launcher's own `PATH` the way a shell script
//! "activates" a virtual environment, every child is spawned through
//! [`LaunchConfig::command`], which carries the resolved binary paths and
//! hands the child a `PATH` with the environment's bin directory prepended.
//! The launcher's own environment is never touched.

use std::env;
use std::ffi::{OsStr, OsString};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::error::{BootstrapError, BootstrapResult};
use crate::project::ProjectDir;
use crate::venv::Venv;

/// Host the development server binds to.
pub const SERVER_HOST: &str = "127.0.0.1";

/// Port the development server binds to.
pub const SERVER_PORT: u16 = 8000;

/// Import string handed to the server runner (`<module>:<attribute>`).
const APP_SPEC: &str = "main:app";

/// Resolved paths for everything spawned after provisioning.
#[derive(Debug)]
pub struct LaunchConfig {
    project: ProjectDir,
    venv: Venv,
}

impl LaunchConfig {
    /// Build a launch configuration from a project and its environment.
    #[must_use]
    pub fn new(project: ProjectDir, venv: Venv) -> Self {
        Self { project, venv }
    }

    /// The project this configuration launches.
    #[must_use]
    pub fn project(&self) -> &ProjectDir {
        &self.project
    }

    /// The environment binaries are resolved against.
    #[must_use]
    pub fn venv(&self) -> &Venv {
        &self.venv
    }

    /// `PATH` value handed to children: the environment's bin directory,
    /// then the launcher's own search path.
    fn child_path(&self) -> OsString {
        let mut paths = vec![self.venv.bin_dir()];
        if let Some(existing) = env::var_os("PATH") {
            paths.extend(env::split_paths(&existing));
        }
        env::join_paths(paths).unwrap_or_else(|_| self.venv.bin_dir().into_os_string())
    }

    /// Build a [`Command`] for `program` with the adjusted `PATH` and the
    /// project root as working directory.
    #[must_use]
    pub fn command(&self, program: impl AsRef<OsStr>) -> Command {
        let mut cmd = Command::new(program);
        cmd.current_dir(self.project.root());
        cmd.env("PATH", self.child_path());
        cmd
    }

    /// Install dependencies from `requirements.txt` with the environment's
    /// pip.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::MissingManifest`] if the manifest is
    /// absent (checked before anything is spawned),
    /// [`BootstrapError::ToolFailed`] if pip exits non-zero, or
    /// [`BootstrapError::Io`] if pip cannot be spawned.
    pub fn install_dependencies(&self) -> BootstrapResult<()> {
        let manifest = self.project.manifest_path();
        if !manifest.is_file() {
            return Err(BootstrapError::MissingManifest { path: manifest });
        }

        info!("installing dependencies from {}", manifest.display());
        let status = self
            .command(self.venv.pip_path())
            .arg("install")
            .arg("-r")
            .arg(&manifest)
            .status()?;

        if !status.success() {
            return Err(BootstrapError::tool_failed("pip install", status));
        }

        Ok(())
    }

    /// Launch the development server and block until it exits.
    ///
    /// Prefers the environment's uvicorn with fixed host/port and
    /// auto-reload; falls back to running the entry point directly with the
    /// environment's Python when uvicorn was not installed. An interrupt
    /// (no exit code) counts as a normal stop.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::ToolFailed`] if the server exits non-zero,
    /// or [`BootstrapError::Io`] if it cannot be spawned.
    pub fn launch_server(&self) -> BootstrapResult<()> {
        let uvicorn = self.venv.uvicorn_path();

        let (tool, status) = if uvicorn.is_file() {
            info!(
                "starting uvicorn on {SERVER_HOST}:{SERVER_PORT} (auto-reload enabled)"
            );
            let status = self
                .command(&uvicorn)
                .arg(APP_SPEC)
                .arg("--host")
                .arg(SERVER_HOST)
                .arg("--port")
                .arg(SERVER_PORT.to_string())
                .arg("--reload")
                .status()?;
            ("uvicorn", status)
        } else {
            warn!("uvicorn not found in environment, falling back to the entry point");
            let status = self
                .command(self.venv.python_path())
                .arg(self.project.entry_point_path())
                .status()?;
            ("python main.py", status)
        };

        match status.code() {
            Some(0) => Ok(()),
            Some(_) => Err(BootstrapError::tool_failed(tool, status)),
            // Terminated by a signal (operator interrupt): a normal stop.
            None => {
                debug!("server terminated by signal");
                Ok(())
            },
        }
    }
}
