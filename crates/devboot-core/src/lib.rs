//! Devboot Core - Environment provisioning primitives for the devboot launcher.
//!
//! This crate provides:
//! - Project root detection and fixed-path layout
//! - Python interpreter discovery
//! - Virtual-environment provisioning with a per-platform layout
//! - An explicit launch configuration for child processes
//! - The default `.env` template seeded on first run
//!
//! Everything here is strictly sequential: each operation either succeeds or
//! fails the whole run. The bootstrapper never retries and never recovers
//! partially installed state.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod envfile;
pub mod error;
pub mod interpreter;
pub mod launch;
pub mod project;
pub mod venv;

pub use envfile::{ENV_TEMPLATE, ensure_env_file};
pub use error::{BootstrapError, BootstrapResult};
pub use interpreter::Interpreter;
pub use launch::LaunchConfig;
pub use project::ProjectDir;
pub use venv::{Venv, VenvLayout, host_layout};
