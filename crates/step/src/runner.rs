//! Seams to the outside world: the toolchain probe and the build process

use swiftstep_toolchain::{BuildCommand, SwiftToolchain, DEFAULT_SWIFT_PROGRAM};

/// Reports the installed Swift toolchain
pub trait ToolchainProbe {
    /// Detect the toolchain the build will use
    fn probe(&self) -> swiftstep_toolchain::Result<SwiftToolchain>;
}

/// Runs `<swift> --version`
#[derive(Debug, Clone)]
pub struct SwiftProbe {
    program: String,
}

impl Default for SwiftProbe {
    fn default() -> Self {
        Self::new(DEFAULT_SWIFT_PROGRAM)
    }
}

impl SwiftProbe {
    /// Probe `program` instead of `swift`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ToolchainProbe for SwiftProbe {
    fn probe(&self) -> swiftstep_toolchain::Result<SwiftToolchain> {
        SwiftToolchain::detect(&self.program)
    }
}

/// Executes a build command and reports its exit code
pub trait CommandRunner {
    /// Blocks until the command exits
    fn run(&self, command: &BuildCommand) -> swiftstep_core::Result<i32>;
}

/// Spawns the command with inherited stdout/stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &BuildCommand) -> swiftstep_core::Result<i32> {
        command.run()
    }
}
