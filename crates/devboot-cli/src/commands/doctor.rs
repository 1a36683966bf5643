//! Doctor command for environment health checks.

use anyhow::Result;
use colored::Colorize;
use devboot_core::{Interpreter, ProjectDir, Venv};

/// Report on everything the bootstrap sequence depends on, without
/// changing any of it.
pub(crate) fn run_doctor(project: &ProjectDir) -> Result<()> {
    println!("{}", "Devboot Doctor - Environment Check".cyan().bold());
    println!();
    println!("  Project root: {}", project.root().display());
    println!();

    // Interpreter
    print!("  Python interpreter... ");
    match Interpreter::detect() {
        Ok(interpreter) => match interpreter.version() {
            Ok(version) => {
                println!("{} ({version})", "OK".green());
                println!("    {}", interpreter.path().display());
            },
            Err(e) => {
                println!("{}", "WARN".yellow());
                println!("    found {} but `--version` failed: {e}", interpreter.path().display());
            },
        },
        Err(_) => {
            println!("{}", "FAIL".red());
            println!("    install Python 3 and make sure `python3` is on PATH");
        },
    }

    // Virtual environment
    print!("  Virtual environment... ");
    let venv = Venv::new(project.venv_dir());
    if venv.exists() {
        println!("{}", "OK".green());
        println!("    {}", venv.dir().display());
    } else {
        println!("{} (will be created on first run)", "WARN".yellow());
    }

    // Server runner
    print!("  Server runner (uvicorn)... ");
    if venv.uvicorn_path().is_file() {
        println!("{}", "OK".green());
    } else {
        println!("{} (will fall back to `python main.py`)", "WARN".yellow());
    }

    // Manifest
    print!("  Dependency manifest... ");
    if project.manifest_path().is_file() {
        println!("{}", "OK".green());
    } else {
        println!("{}", "FAIL".red());
        println!("    {} is required", project.manifest_path().display());
    }

    // Entry point
    print!("  Entry point... ");
    if project.entry_point_path().is_file() {
        println!("{}", "OK".green());
    } else {
        println!("{} (no main.py found)", "WARN".yellow());
    }

    // Configuration
    print!("  Configuration (.env)... ");
    if project.env_file_path().exists() {
        println!("{}", "OK".green());
    } else {
        println!("{} (a default will be seeded on first run)", "WARN".yellow());
    }

    println!();
    Ok(())
}
