//! Virtual-environment provisioning and per-platform layout.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::{BootstrapError, BootstrapResult};
use crate::interpreter::Interpreter;

/// Per-platform layout of a virtual environment directory.
///
/// The only things that differ between platforms are where installed
/// executables land and how they are named, so this is the single seam the
/// rest of the crate branches on. Selected once at startup via
/// [`host_layout`].
pub trait VenvLayout {
    /// Name of the directory holding installed executables.
    fn bin_dir_name(&self) -> &'static str;

    /// Executable file name for a bare tool name.
    fn exe_name(&self, name: &str) -> String;
}

/// Layout used by POSIX-like hosts: `venv/bin/<name>`.
#[derive(Debug, Clone, Copy)]
pub struct PosixLayout;

impl VenvLayout for PosixLayout {
    fn bin_dir_name(&self) -> &'static str {
        "bin"
    }

    fn exe_name(&self, name: &str) -> String {
        name.to_string()
    }
}

/// Layout used by Windows hosts: `venv\Scripts\<name>.exe`.
#[derive(Debug, Clone, Copy)]
pub struct WindowsLayout;

impl VenvLayout for WindowsLayout {
    fn bin_dir_name(&self) -> &'static str {
        "Scripts"
    }

    fn exe_name(&self, name: &str) -> String {
        format!("{name}.exe")
    }
}

/// Select the layout for the host platform.
#[must_use]
pub fn host_layout() -> Box<dyn VenvLayout> {
    if cfg!(windows) {
        Box::new(WindowsLayout)
    } else {
        Box::new(PosixLayout)
    }
}

/// An isolated environment directory.
///
/// Created at most once; a pre-existing directory is reused untouched.
pub struct Venv {
    dir: PathBuf,
    layout: Box<dyn VenvLayout>,
}

impl std::fmt::Debug for Venv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Venv").field("dir", &self.dir).finish()
    }
}

impl Venv {
    /// Create a handle for the environment at `dir` using the host layout.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_layout(dir, host_layout())
    }

    /// Create a handle with an explicit layout (useful for testing the
    /// non-host platform's path shape).
    #[must_use]
    pub fn with_layout(dir: impl Into<PathBuf>, layout: Box<dyn VenvLayout>) -> Self {
        Self {
            dir: dir.into(),
            layout,
        }
    }

    /// Environment root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether the environment directory already exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    /// Directory holding the environment's executables.
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.dir.join(self.layout.bin_dir_name())
    }

    /// Path to the environment's Python executable.
    #[must_use]
    pub fn python_path(&self) -> PathBuf {
        self.bin_dir().join(self.layout.exe_name("python"))
    }

    /// Path to the environment's pip executable.
    #[must_use]
    pub fn pip_path(&self) -> PathBuf {
        self.bin_dir().join(self.layout.exe_name("pip"))
    }

    /// Path to the environment's uvicorn executable, if installed.
    #[must_use]
    pub fn uvicorn_path(&self) -> PathBuf {
        self.bin_dir().join(self.layout.exe_name("uvicorn"))
    }

    /// Ensure the environment exists, creating it with
    /// `<python> -m venv <dir>` when absent.
    ///
    /// Idempotent: a pre-existing directory is reused without invoking the
    /// interpreter at all.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::ToolFailed`] if environment creation exits
    /// non-zero, or [`BootstrapError::Io`] if the interpreter cannot be
    /// spawned.
    pub fn ensure(&self, interpreter: &Interpreter) -> BootstrapResult<()> {
        if self.exists() {
            debug!("reusing existing environment at {}", self.dir.display());
            return Ok(());
        }

        info!("creating virtual environment at {}", self.dir.display());
        let status = Command::new(interpreter.path())
            .arg("-m")
            .arg("venv")
            .arg(&self.dir)
            .status()?;

        if !status.success() {
            return Err(BootstrapError::tool_failed("python -m venv", status));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_layout_paths() {
        let venv = Venv::with_layout("/srv/app/venv", Box::new(PosixLayout));
        assert_eq!(venv.bin_dir(), PathBuf::from("/srv/app/venv/bin"));
        assert_eq!(venv.python_path(), PathBuf::from("/srv/app/venv/bin/python"));
        assert_eq!(venv.pip_path(), PathBuf::from("/srv/app/venv/bin/pip"));
        assert_eq!(
            venv.uvicorn_path(),
            PathBuf::from("/srv/app/venv/bin/uvicorn")
        );
    }

    #[test]
    fn windows_layout_paths() {
        let venv = Venv::with_layout("C:/app/venv", Box::new(WindowsLayout));
        assert_eq!(venv.bin_dir(), PathBuf::from("C:/app/venv/Scripts"));
        assert_eq!(
            venv.python_path(),
            PathBuf::from("C:/app/venv/Scripts/python.exe")
        );
        assert_eq!(venv.pip_path(), PathBuf::from("C:/app/venv/Scripts/pip.exe"));
    }

    #[test]
    fn ensure_is_idempotent_for_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let venv_dir = dir.path().join("venv");
        std::fs::create_dir(&venv_dir).unwrap();
        let marker = venv_dir.join("marker");
        std::fs::write(&marker, "keep me").unwrap();

        let venv = Venv::new(&venv_dir);
        // The interpreter path is deliberately bogus: a pre-existing
        // directory must be reused without spawning anything.
        let interpreter = Interpreter::from_path("/nonexistent/python3");
        venv.ensure(&interpreter).unwrap();

        assert_eq!(std::fs::read_to_string(&marker).unwrap(), "keep me");
    }

    #[cfg(unix)]
    #[test]
    fn ensure_invokes_interpreter_when_absent() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        // Stub interpreter records its arguments and creates the directory,
        // as `python -m venv` would.
        let stub = dir.path().join("python3");
        let log = dir.path().join("argv.log");
        std::fs::write(
            &stub,
            format!("#!/bin/sh\necho \"$@\" > {}\nmkdir -p \"$3\"\n", log.display()),
        )
        .unwrap();
        std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).unwrap();

        let venv_dir = dir.path().join("venv");
        let venv = Venv::new(&venv_dir);
        venv.ensure(&Interpreter::from_path(&stub)).unwrap();

        assert!(venv_dir.is_dir());
        let argv = std::fs::read_to_string(&log).unwrap();
        assert!(argv.contains("-m venv"));
        assert!(argv.contains(venv_dir.to_str().unwrap()));
    }

    #[cfg(unix)]
    #[test]
    fn ensure_propagates_creation_failure() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let stub = dir.path().join("python3");
        std::fs::write(&stub, "#!/bin/sh\nexit 3\n").unwrap();
        std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).unwrap();

        let venv = Venv::new(dir.path().join("venv"));
        let result = venv.ensure(&Interpreter::from_path(&stub));
        assert!(matches!(
            result,
            Err(BootstrapError::ToolFailed { status: Some(3), .. })
        ));
    }
}
