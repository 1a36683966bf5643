//! Devboot CLI - development-environment bootstrapper and launcher.
//!
//! The binary is deliberately thin: it resolves the project root, then runs
//! one linear sequence from `devboot-core` — detect an interpreter,
//! provision the virtual environment, install dependencies, seed `.env`,
//! launch the server. Invoked with no arguments it runs the full sequence.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use devboot_core::ProjectDir;

mod commands;
mod theme;

use commands::{doctor, init, up};
use theme::Theme;

/// Devboot - bootstrap and launch the development server
#[derive(Parser)]
#[command(name = "devboot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root (default: detected from the current directory)
    #[arg(short, long, global = true)]
    project: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision the environment and start the server (the default)
    Up,

    /// Check the environment without changing it
    Doctor,

    /// Seed the default .env configuration file
    Init,
}

/// Set up logging. Operator-facing progress goes to stdout through the
/// theme; tracing output stays on stderr and is quiet unless `--verbose`
/// or `RUST_LOG` asks for more.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let project = match cli.project.as_deref() {
        Some(path) => ProjectDir::from_path(path),
        None => ProjectDir::detect(&std::env::current_dir()?),
    };
    tracing::debug!("resolved project root: {}", project.root().display());

    match cli.command {
        Some(Commands::Doctor) => doctor::run_doctor(&project),
        Some(Commands::Init) => init::run_init(&project),
        Some(Commands::Up) | None => up::run_up(&project),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", Theme::error(&format!("{e:#}")));
            ExitCode::FAILURE
        },
    }
}
