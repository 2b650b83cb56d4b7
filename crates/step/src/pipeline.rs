//! The step pipeline: validate, probe, build, export

use crate::error::{Result, StepError};
use crate::export::{export_executable_path, EnvmanExporter, ExportStatus, Exporter};
use crate::inputs::{BuildConfig, StepInputs, Variant};
use crate::runner::{CommandRunner, SwiftProbe, SystemRunner, ToolchainProbe};
use serde::Serialize;
use std::time::Duration;
use swiftstep_cli::output::{format_duration, Status};
use swiftstep_telemetry::Timer;
use swiftstep_toolchain::{BuildCommand, SwiftToolchain};

/// What a successful run did
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// Validated inputs
    pub config: BuildConfig,
    /// Probed toolchain
    pub toolchain: SwiftToolchain,
    /// Rendered `swift build` command
    pub command: String,
    /// Wall time of `swift build`
    pub build_duration: Duration,
    /// Outcome of publishing the executable path
    pub export: ExportStatus,
}

/// Map a validated configuration onto a `swift build` invocation
pub fn build_command(program: &str, config: &BuildConfig) -> BuildCommand {
    BuildCommand::new(program)
        .build_path(config.build_path())
        .configuration(config.configuration())
        .build_tests(config.build_tests())
        .disable_sandbox(config.disable_sandbox())
}

/// The step with its collaborators
pub struct Step {
    swift_program: String,
    probe: Box<dyn ToolchainProbe>,
    runner: Box<dyn CommandRunner>,
    exporter: Box<dyn Exporter>,
}

impl Step {
    /// Step wired to the real `swift` and `envman` executables
    pub fn system(swift_program: &str, envman_program: &str) -> Self {
        Self {
            swift_program: swift_program.to_string(),
            probe: Box::new(SwiftProbe::new(swift_program)),
            runner: Box::new(SystemRunner),
            exporter: Box::new(EnvmanExporter::new(envman_program)),
        }
    }

    /// Replace the toolchain probe
    #[must_use]
    pub fn with_probe(mut self, probe: impl ToolchainProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Replace the build runner
    #[must_use]
    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Replace the output exporter
    #[must_use]
    pub fn with_exporter(mut self, exporter: impl Exporter + 'static) -> Self {
        self.exporter = Box::new(exporter);
        self
    }

    /// Print and validate the raw inputs, then run the build
    pub fn run(&self, inputs: &StepInputs, variant: Variant) -> Result<StepReport> {
        inputs.print(variant);

        let config = inputs.validate(variant)?;
        tracing::info!(%variant, config = ?config, "Inputs validated");

        self.run_config(config)
    }

    /// Run a validated configuration
    ///
    /// The toolchain probe is informational only, but a failed probe still
    /// aborts the step before anything is built.
    pub fn run_config(&self, config: BuildConfig) -> Result<StepReport> {
        Status::section("Other Configs:");
        let toolchain = self.probe.probe()?;
        Status::detail(
            "swift_version",
            &format!("{} ({})", toolchain.version, toolchain.target),
        );

        let command = build_command(&self.swift_program, &config);
        let printable = command.printable_cmd();
        Status::command(&printable);

        let timer = Timer::start("swift_build");
        let exit_code = self.runner.run(&command).map_err(StepError::Spawn)?;
        let build_duration = timer.stop();

        if exit_code != 0 {
            tracing::debug!(exit_code, command = %printable, "swift build failed");
            return Err(StepError::Process { exit_code });
        }

        Status::success(&format!("Build succeeded in {}", format_duration(build_duration)));

        let export = export_executable_path(
            self.exporter.as_ref(),
            config.build_path(),
            config.configuration(),
        );
        match &export {
            ExportStatus::Exported(path) => Status::detail(crate::EXECUTABLE_PATH_KEY, &path.to_string_lossy()),
            ExportStatus::Failed(message) => Status::warning(message),
            ExportStatus::Skipped => {}
        }

        Ok(StepReport {
            config,
            toolchain,
            command: printable,
            build_duration,
            export,
        })
    }
}
