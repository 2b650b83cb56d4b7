//! Terminal output utilities
//!
//! Provides consistent formatting for step logs. CI log viewers render ANSI
//! colors, so every helper writes colored text.

use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message.red());
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message.yellow());
    }

    /// Print a section title preceded by a blank line
    pub fn section(title: &str) {
        println!();
        println!("{}", title.blue().bold());
    }

    /// Print a `- Label: value` parameter line
    pub fn param(label: &str, value: &str) {
        println!("- {}: {}", label, value);
    }

    /// Print a `* key: value` detail line
    pub fn detail(key: &str, value: &str) {
        println!("* {}: {}", key, value);
    }

    /// Print the command about to run
    pub fn command(cmd: &str) {
        println!();
        println!("{} {}", "$".dimmed(), cmd.bold());
        println!();
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}
