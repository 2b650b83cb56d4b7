//! Process execution utilities
//!
//! Provides a unified interface for running external commands with:
//! - Output capture
//! - Streaming output
//! - Input piped through stdin

use crate::error::{Error, Result, ResultExt};
use std::io::{ErrorKind, Write};
use std::process::{Command, Output, Stdio};

/// Result of a command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// Exit code of the command
    pub exit_code: i32,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandResult {
    /// Create from `std::process::Output`
    pub fn from_output(output: &Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Get combined output (stdout + stderr)
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

fn spawn_error(program: &str, err: &std::io::Error) -> Error {
    if err.kind() == ErrorKind::NotFound {
        Error::command_not_found(program)
    } else {
        Error::process(format!("Failed to execute {program}: {err}"))
    }
}

/// Run a command and capture output
///
/// # Errors
///
/// Fails when the program cannot be started. A non-zero exit is reported
/// through [`CommandResult::success`], not as an error.
pub fn run_command(program: &str, args: &[&str]) -> Result<CommandResult> {
    let output = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| spawn_error(program, &e))?;

    Ok(CommandResult::from_output(&output))
}

/// Run a command, writing `input` to its stdin, and capture output
///
/// # Errors
///
/// Fails when the program cannot be started or stdin cannot be written.
pub fn run_command_with_stdin(program: &str, args: &[&str], input: &str) -> Result<CommandResult> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(program, &e))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(input.as_bytes())
            .map_err(Error::from)
            .context(format!("While writing stdin of {program}"))?;
    }

    let output = child
        .wait_with_output()
        .map_err(Error::from)
        .context(format!("While waiting for {program}"))?;

    Ok(CommandResult::from_output(&output))
}

/// Run a command and stream output to stdout/stderr as it arrives
///
/// Blocks until the child exits and returns its exit code, or `-1` when it
/// was terminated by a signal.
///
/// # Errors
///
/// Fails when the program cannot be started.
pub fn run_command_streaming(program: &str, args: &[&str]) -> Result<i32> {
    let status = Command::new(program)
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| spawn_error(program, &e))?;

    Ok(status.code().unwrap_or(-1))
}
