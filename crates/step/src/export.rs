//! Publishing step outputs to later pipeline steps

use serde::Serialize;
use std::path::{Path, PathBuf};
use swiftstep_core::error::{Error, ErrorCode, Result, ResultExt};
use swiftstep_core::process::run_command_with_stdin;
use swiftstep_toolchain::BuildConfiguration;

/// Output key holding the built executable directory
pub const EXECUTABLE_PATH_KEY: &str = "BITRISE_EXECUTABLE_PATH";

/// Default exporter executable
pub const DEFAULT_ENVMAN_PROGRAM: &str = "envman";

/// Sink for `key=value` step outputs
pub trait Exporter {
    /// Publish `value` under `key`
    fn export(&self, key: &str, value: &str) -> Result<()>;
}

/// Exports through `envman add --key <key>`, value on stdin
#[derive(Debug, Clone)]
pub struct EnvmanExporter {
    program: String,
}

impl Default for EnvmanExporter {
    fn default() -> Self {
        Self::new(DEFAULT_ENVMAN_PROGRAM)
    }
}

impl EnvmanExporter {
    /// Exporter running `program` instead of `envman`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Exporter for EnvmanExporter {
    fn export(&self, key: &str, value: &str) -> Result<()> {
        let result = run_command_with_stdin(&self.program, &["add", "--key", key], value)
            .context(format!("While exporting {key}"))?;

        if !result.success {
            let mut err = Error::command_failed(&self.program, result.exit_code);
            let output = result.combined_output();
            if !output.trim().is_empty() {
                err = err.with_context(output.trim().to_string());
            }
            return Err(err);
        }

        tracing::debug!(key, value, "Exported step output");
        Ok(())
    }
}

/// Directory swift build writes products of `configuration` into
pub fn artifact_path(build_path: &str, configuration: BuildConfiguration) -> PathBuf {
    Path::new(build_path).join(configuration.as_str())
}

/// Outcome of the export stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ExportStatus {
    /// Published under [`EXECUTABLE_PATH_KEY`]
    Exported(PathBuf),
    /// Nothing to export without a configuration
    Skipped,
    /// The build succeeded but publishing failed
    Failed(String),
}

impl ExportStatus {
    /// Whether publishing failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Publish the executable path, downgrading failure to a warning status
///
/// The caller prints the warning; this only records it at debug level.
pub fn export_executable_path(
    exporter: &dyn Exporter,
    build_path: &str,
    configuration: Option<BuildConfiguration>,
) -> ExportStatus {
    let Some(configuration) = configuration else {
        return ExportStatus::Skipped;
    };

    let path = artifact_path(build_path, configuration);
    let value = path.to_string_lossy();

    match exporter.export(EXECUTABLE_PATH_KEY, &value) {
        Ok(()) => ExportStatus::Exported(path),
        Err(err) => {
            let message = format!("Failed to export: {EXECUTABLE_PATH_KEY}, error: {err}");
            tracing::debug!(code = %err.code, key = EXECUTABLE_PATH_KEY, "{}", message);
            tracing::debug!(report = ?err.to_report(), "Export error details");
            if err.code == ErrorCode::CommandNotFound {
                tracing::debug!("envman is only available on Bitrise stacks");
            }
            ExportStatus::Failed(message)
        }
    }
}
