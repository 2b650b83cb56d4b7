//! `swift build` command construction
//!
//! [`BuildCommand`] is a plain value: setting options never touches the
//! filesystem or spawns anything, and the same options always yield the same
//! argument list.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use swiftstep_core::process::run_command_streaming;

/// Build mode passed to `--configuration`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildConfiguration {
    /// `--configuration debug`
    Debug,
    /// `--configuration release`
    Release,
}

impl BuildConfiguration {
    /// Accepted input values, in declared order
    pub const OPTIONS: [&'static str; 2] = ["debug", "release"];

    /// Value as passed on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildConfiguration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            other => Err(format!("unknown build configuration: {other}")),
        }
    }
}

/// A `swift build` invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildCommand {
    program: String,
    build_path: Option<String>,
    configuration: Option<BuildConfiguration>,
    build_tests: bool,
    disable_sandbox: bool,
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self::new(crate::DEFAULT_SWIFT_PROGRAM)
    }
}

impl BuildCommand {
    /// Command with no options set, run through `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            build_path: None,
            configuration: None,
            build_tests: false,
            disable_sandbox: false,
        }
    }

    /// Directory for intermediate and final build products
    #[must_use]
    pub fn build_path(mut self, path: impl Into<String>) -> Self {
        self.build_path = Some(path.into());
        self
    }

    /// Leaving this unset lets `swift build` pick its default mode
    #[must_use]
    pub fn configuration(mut self, configuration: Option<BuildConfiguration>) -> Self {
        self.configuration = configuration;
        self
    }

    /// Also build test targets
    #[must_use]
    pub fn build_tests(mut self, enabled: bool) -> Self {
        self.build_tests = enabled;
        self
    }

    /// Turn off the package manager's build sandbox
    #[must_use]
    pub fn disable_sandbox(mut self, disabled: bool) -> Self {
        self.disable_sandbox = disabled;
        self
    }

    /// Executable the command runs
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Ordered arguments, starting with the `build` subcommand
    ///
    /// Boolean options are emitted as bare flags when enabled and omitted
    /// otherwise.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["build".to_string()];

        if let Some(path) = &self.build_path {
            args.push("--build-path".to_string());
            args.push(path.clone());
        }

        if let Some(configuration) = self.configuration {
            args.push("--configuration".to_string());
            args.push(configuration.to_string());
        }

        if self.build_tests {
            args.push("--build-tests".to_string());
        }

        if self.disable_sandbox {
            args.push("--disable-sandbox".to_string());
        }

        args
    }

    /// Program and arguments joined by single spaces, for logs
    pub fn printable_cmd(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run with output streamed to this process's stdout/stderr
    ///
    /// Returns the child's exit code.
    pub fn run(&self) -> swiftstep_core::Result<i32> {
        let args = self.args();
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        tracing::debug!(program = %self.program, args = ?args, "Running swift build");
        run_command_streaming(&self.program, &arg_refs)
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.printable_cmd())
    }
}
