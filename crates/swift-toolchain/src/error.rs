use thiserror::Error;

/// Result type for toolchain operations
pub type Result<T> = std::result::Result<T, ToolchainError>;

/// Failures while probing the Swift toolchain
#[derive(Error, Debug)]
pub enum ToolchainError {
    /// No `swift` executable could be resolved
    #[error("Swift not found: {0}")]
    SwiftNotFound(String),

    /// The version banner had no recognizable version
    #[error("Failed to parse Swift version: {0}")]
    ParseError(String),

    /// `swift --version` exited non-zero
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// The probe process could not be run
    #[error(transparent)]
    Process(#[from] swiftstep_core::Error),
}
