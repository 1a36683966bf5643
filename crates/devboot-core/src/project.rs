//! Project root detection and fixed-path layout.
//!
//! The launcher works with a handful of fixed-name files next to the
//! application's entry point:
//!
//! ```text
//! <project>/
//! ├── requirements.txt      (dependency manifest, required)
//! ├── main.py               (application entry point)
//! ├── .env                  (configuration, seeded on first run)
//! └── venv/                 (isolated environment, created on first run)
//! ```
//!
//! [`ProjectDir`] anchors all of these so they resolve against the project
//! root rather than whatever directory the launcher happens to be invoked
//! from.

use std::path::{Path, PathBuf};

/// Name of the dependency manifest file.
pub const MANIFEST_FILE: &str = "requirements.txt";

/// Name of the application entry-point file.
pub const ENTRY_POINT_FILE: &str = "main.py";

/// Name of the configuration file seeded on first run.
pub const ENV_FILE: &str = ".env";

/// Name of the isolated environment directory.
pub const VENV_DIR: &str = "venv";

/// The directory holding the application being launched.
///
/// All manifest, configuration, and environment paths hang off this root.
#[derive(Debug, Clone)]
pub struct ProjectDir {
    root: PathBuf,
}

impl ProjectDir {
    /// Detect the project root by walking up from `start_dir`.
    ///
    /// Detection order:
    /// 1. Directory containing `requirements.txt`
    /// 2. Directory containing `main.py`
    /// 3. Directory containing `.git`
    /// 4. Fallback to `start_dir` itself
    #[must_use]
    pub fn detect(start_dir: &Path) -> Self {
        let start = if start_dir.is_absolute() {
            start_dir.to_path_buf()
        } else {
            std::env::current_dir().unwrap_or_default().join(start_dir)
        };

        let mut current = start.as_path();

        loop {
            if current.join(MANIFEST_FILE).is_file() {
                return Self {
                    root: current.to_path_buf(),
                };
            }

            if current.join(ENTRY_POINT_FILE).is_file() {
                return Self {
                    root: current.to_path_buf(),
                };
            }

            if current.join(".git").exists() {
                return Self {
                    root: current.to_path_buf(),
                };
            }

            match current.parent() {
                Some(parent) if parent != current => current = parent,
                _ => break,
            }
        }

        Self { root: start }
    }

    /// Create from an explicit project root (useful for testing and the
    /// `--project` override).
    ///
    /// A relative root is resolved against the current directory at
    /// construction time, so the stored paths stay valid after the launcher
    /// changes its working directory.
    #[must_use]
    pub fn from_path(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir().unwrap_or_default().join(root)
        };
        Self { root }
    }

    /// Project root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the dependency manifest (`requirements.txt`).
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Path to the application entry point (`main.py`).
    #[must_use]
    pub fn entry_point_path(&self) -> PathBuf {
        self.root.join(ENTRY_POINT_FILE)
    }

    /// Path to the configuration file (`.env`).
    #[must_use]
    pub fn env_file_path(&self) -> PathBuf {
        self.root.join(ENV_FILE)
    }

    /// Path to the isolated environment directory (`venv/`).
    #[must_use]
    pub fn venv_dir(&self) -> PathBuf {
        self.root.join(VENV_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_with_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "fastapi\n").unwrap();

        let sub = dir.path().join("app").join("api");
        std::fs::create_dir_all(&sub).unwrap();

        let project = ProjectDir::detect(&sub);
        assert_eq!(project.root(), dir.path());
    }

    #[test]
    fn detect_with_entry_point() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ENTRY_POINT_FILE), "app = None\n").unwrap();

        let sub = dir.path().join("app");
        std::fs::create_dir_all(&sub).unwrap();

        let project = ProjectDir::detect(&sub);
        assert_eq!(project.root(), dir.path());
    }

    #[test]
    fn detect_with_git() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();

        let sub = dir.path().join("src");
        std::fs::create_dir_all(&sub).unwrap();

        let project = ProjectDir::detect(&sub);
        assert_eq!(project.root(), dir.path());
    }

    #[test]
    fn detect_prefers_manifest_over_git() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();

        let nested = dir.path().join("backend");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join(MANIFEST_FILE), "fastapi\n").unwrap();

        let project = ProjectDir::detect(&nested);
        assert_eq!(project.root(), nested);
    }

    #[test]
    fn detect_fallback_is_start_dir() {
        let dir = tempfile::tempdir().unwrap();
        let isolated = dir.path().join("isolated");
        std::fs::create_dir_all(&isolated).unwrap();

        // No markers anywhere up the tempdir tree; from_path is the
        // deterministic equivalent of the fallback.
        let project = ProjectDir::from_path(&isolated);
        assert_eq!(project.root(), isolated);
    }

    #[test]
    fn from_path_absolutizes_relative_roots() {
        let project = ProjectDir::from_path("backend");
        let expected = std::env::current_dir().unwrap().join("backend");
        assert_eq!(project.root(), expected);
        assert!(project.manifest_path().is_absolute());
        assert!(project.venv_dir().is_absolute());
    }

    #[test]
    fn path_accessors() {
        let project = ProjectDir::from_path("/srv/app");
        assert_eq!(project.root(), Path::new("/srv/app"));
        assert_eq!(
            project.manifest_path(),
            PathBuf::from("/srv/app/requirements.txt")
        );
        assert_eq!(project.entry_point_path(), PathBuf::from("/srv/app/main.py"));
        assert_eq!(project.env_file_path(), PathBuf::from("/srv/app/.env"));
        assert_eq!(project.venv_dir(), PathBuf::from("/srv/app/venv"));
    }
}
