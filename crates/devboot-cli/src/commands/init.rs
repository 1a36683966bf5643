//! Init command — seed the configuration file without launching anything.

use std::io::Write;

use devboot_core::{ProjectDir, ensure_env_file};

use crate::theme::Theme;

/// Write the default `.env` if the project does not have one yet.
pub(crate) fn run_init(project: &ProjectDir) -> anyhow::Result<()> {
    run_init_to(project, &mut std::io::stdout())
}

fn run_init_to(project: &ProjectDir, out: &mut impl Write) -> anyhow::Result<()> {
    let env_path = project.env_file_path();

    if ensure_env_file(project)? {
        writeln!(
            out,
            "{}",
            Theme::success(&format!("Created {}", env_path.display()))
        )?;
        writeln!(
            out,
            "{}",
            Theme::warning("The file contains placeholder values — edit it before production use")
        )?;
    } else {
        writeln!(
            out,
            "{}",
            Theme::info(&format!(
                "{} already exists, leaving it untouched",
                env_path.display()
            ))
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_creates_env_and_warns() {
        let dir = tempfile::tempdir().unwrap();
        let project = ProjectDir::from_path(dir.path());

        let mut out = Vec::new();
        run_init_to(&project, &mut out).unwrap();

        assert!(project.env_file_path().exists());
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Created"));
        assert!(output.contains("edit it before production use"));
    }

    #[test]
    fn second_run_reports_existing_file_without_warning() {
        let dir = tempfile::tempdir().unwrap();
        let project = ProjectDir::from_path(dir.path());

        let custom = "DATABASE_URL=postgresql://real:secret@db/prod\n";
        std::fs::write(project.env_file_path(), custom).unwrap();

        let mut out = Vec::new();
        run_init_to(&project, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("already exists"));
        assert!(!output.contains("edit it before production use"));
        assert_eq!(
            std::fs::read_to_string(project.env_file_path()).unwrap(),
            custom
        );
    }
}
