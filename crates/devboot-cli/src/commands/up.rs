//! Up command — the full bootstrap-and-launch sequence.

use anyhow::{Context, Result};
use devboot_core::launch::{SERVER_HOST, SERVER_PORT};
use devboot_core::{Interpreter, LaunchConfig, ProjectDir, Venv, ensure_env_file};

use crate::theme::Theme;

/// Provision the environment and launch the development server.
///
/// Strictly sequential; the first failing step aborts the whole run.
pub(crate) fn run_up(project: &ProjectDir) -> Result<()> {
    println!("{}", Theme::header("Devboot — environment bootstrap"));
    println!(
        "{}",
        Theme::step("📁", &format!("Project root: {}", project.root().display()))
    );

    // All fixed-name inputs resolve against the project root, regardless of
    // where the launcher was invoked from.
    std::env::set_current_dir(project.root())
        .with_context(|| format!("failed to enter {}", project.root().display()))?;

    let interpreter = Interpreter::detect()?;
    let version = interpreter.version()?;
    println!(
        "{}",
        Theme::step(
            "🐍",
            &format!(
                "Interpreter: {} {}",
                interpreter.path().display(),
                Theme::dimmed(&format!("({version})"))
            )
        )
    );

    let venv = Venv::new(project.venv_dir());
    if venv.exists() {
        println!(
            "{}",
            Theme::step(
                "♻️ ",
                &format!("Reusing virtual environment at {}", venv.dir().display())
            )
        );
    } else {
        println!(
            "{}",
            Theme::step(
                "🧪",
                &format!("Creating virtual environment at {}", venv.dir().display())
            )
        );
    }
    venv.ensure(&interpreter)?;

    let config = LaunchConfig::new(project.clone(), venv);

    println!(
        "{}",
        Theme::step(
            "📦",
            &format!(
                "Installing dependencies from {}",
                config.project().manifest_path().display()
            )
        )
    );
    config.install_dependencies()?;

    if ensure_env_file(config.project())? {
        println!(
            "{}",
            Theme::warning("Created a default .env — edit it before any production use")
        );
    }

    println!(
        "{}",
        Theme::step(
            "🚀",
            &format!("Starting server at http://{SERVER_HOST}:{SERVER_PORT} (Ctrl+C to stop)")
        )
    );
    config.launch_server()?;

    println!("{}", Theme::success("Server stopped"));
    Ok(())
}
