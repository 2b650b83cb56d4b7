//! swiftstep-build - run `swift build` as a CI step
//!
//! Step inputs (`build_path`, `configuration`, `build_tests`,
//! `disable_sandbox`) are read from the environment. Flags only tune the
//! step itself.

use clap::Parser;
use std::process::ExitCode;
use swiftstep_cli::output::Status;
use swiftstep_core::error::exit_codes;
use swiftstep_step::export::DEFAULT_ENVMAN_PROGRAM;
use swiftstep_step::{Step, StepInputs, Variant};
use swiftstep_telemetry::{init_with_config, session_id, TelemetryConfig};
use swiftstep_toolchain::DEFAULT_SWIFT_PROGRAM;

/// Run swift build from CI step inputs
#[derive(Parser)]
#[command(name = "swiftstep-build")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Swift executable
    #[arg(long, env = "SWIFTSTEP_SWIFT", default_value = DEFAULT_SWIFT_PROGRAM)]
    swift: String,

    /// Executable used to publish step outputs
    #[arg(long, env = "SWIFTSTEP_ENVMAN", default_value = DEFAULT_ENVMAN_PROGRAM)]
    envman: String,

    /// Step variant: with-configuration or plain
    #[arg(long, env = "SWIFTSTEP_VARIANT")]
    variant: Option<Variant>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_verbosity(cli.verbose);
    telemetry.json |= cli.json_logs;
    if let Err(err) = init_with_config(&telemetry) {
        Status::warning(&err.to_string());
    }

    let variant = cli.variant.unwrap_or_default();
    let inputs = StepInputs::from_env(variant);

    match Step::system(&cli.swift, &cli.envman).run(&inputs, variant) {
        Ok(report) => {
            tracing::info!(
                session_id = %session_id(),
                command = %report.command,
                duration_ms = report.build_duration.as_millis(),
                export = ?report.export,
                "Step finished"
            );
            ExitCode::from(exit_codes::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(
                session_id = %session_id(),
                stage = err.stage(),
                code = %err.code(),
                error = ?err,
                "Step failed"
            );
            Status::error(&err.to_string());
            ExitCode::from(err.exit_code())
        }
    }
}
