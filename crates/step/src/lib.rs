//! The swift build CI step
//!
//! Reads the step inputs once, validates them into an immutable
//! [`BuildConfig`], probes the Swift toolchain, runs `swift build` and
//! publishes the executable path for later steps.
//!
//! # Example
//!
//! ```rust,no_run
//! use swiftstep_step::{Step, StepInputs, Variant};
//!
//! let inputs = StepInputs {
//!     build_path: ".build".to_string(),
//!     configuration: "release".to_string(),
//!     build_tests: "no".to_string(),
//!     disable_sandbox: "no".to_string(),
//! };
//!
//! let report = Step::system("swift", "envman").run(&inputs, Variant::WithConfiguration)?;
//! println!("{}", report.command);
//! # Ok::<(), swiftstep_step::StepError>(())
//! ```

pub mod error;
pub mod export;
pub mod inputs;
pub mod pipeline;
pub mod runner;

pub use error::{Result, StepError};
pub use export::{artifact_path, EnvmanExporter, ExportStatus, Exporter, EXECUTABLE_PATH_KEY};
pub use inputs::{BuildConfig, StepInputs, Variant};
pub use pipeline::{Step, StepReport};
pub use runner::{CommandRunner, SwiftProbe, SystemRunner, ToolchainProbe};
