//! Terminal styling for the launcher's operator-facing output.

use colored::Colorize;

/// CLI theme configuration.
pub(crate) struct Theme;

impl Theme {
    /// Format the banner headline above the bootstrap sequence.
    pub(crate) fn header(text: &str) -> String {
        format!("{}", text.bold().cyan())
    }

    /// Format one step of the bootstrap sequence: an emoji marker
    /// followed by what is about to happen.
    pub(crate) fn step(marker: &str, text: &str) -> String {
        format!("{marker} {text}")
    }

    /// Format a success message.
    pub(crate) fn success(text: &str) -> String {
        format!("{} {}", "✓".green(), text)
    }

    /// Format an error message.
    pub(crate) fn error(text: &str) -> String {
        format!("{} {}", "✗".red(), text.red())
    }

    /// Format a warning the operator is expected to act on.
    pub(crate) fn warning(text: &str) -> String {
        format!("{} {}", "!".yellow(), text.yellow())
    }

    /// Format an informational note.
    pub(crate) fn info(text: &str) -> String {
        format!("{} {}", "i".blue(), text)
    }

    /// Format supplementary detail, de-emphasized.
    pub(crate) fn dimmed(text: &str) -> String {
        format!("{}", text.dimmed())
    }
}
