use swiftstep_core::error::{exit_codes, ErrorCode};
use swiftstep_core::validation::ValidationError;
use swiftstep_toolchain::ToolchainError;
use thiserror::Error;

/// Result type for the step pipeline
pub type Result<T> = std::result::Result<T, StepError>;

/// Fatal step failures
///
/// Export problems are not listed here; they surface as
/// [`crate::ExportStatus::Failed`] and never fail the step.
#[derive(Error, Debug)]
pub enum StepError {
    /// An input was missing or invalid
    #[error("Issue with input: {0}")]
    Input(#[from] ValidationError),

    /// `swift --version` could not be run or parsed
    #[error("Failed to get the version of swift! Error: {0}")]
    ToolchainProbe(#[from] ToolchainError),

    /// `swift build` exited non-zero
    #[error("Build failed, error: exit status {exit_code}")]
    Process {
        /// Child exit code, `-1` when killed by a signal
        exit_code: i32,
    },

    /// `swift build` could not be started
    #[error("Build failed, error: {0}")]
    Spawn(#[source] swiftstep_core::Error),
}

impl StepError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> u8 {
        exit_codes::FAILURE
    }

    /// Error code for structured logs
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Input(err) => err.code(),
            Self::ToolchainProbe(ToolchainError::Process(err)) | Self::Spawn(err) => err.code,
            Self::ToolchainProbe(ToolchainError::SwiftNotFound(_)) => ErrorCode::CommandNotFound,
            Self::ToolchainProbe(_) | Self::Process { .. } => ErrorCode::CommandFailed,
        }
    }

    /// Short stage name for structured logs
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Input(_) => "validate",
            Self::ToolchainProbe(_) => "probe",
            Self::Process { .. } | Self::Spawn(_) => "build",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_message() {
        let err = StepError::from(ValidationError::MissingInput {
            key: "build_path".to_string(),
        });
        assert_eq!(err.to_string(), "Issue with input: Missing required input: build_path");
        assert_eq!(err.stage(), "validate");
        assert_eq!(err.code(), ErrorCode::MissingInput);
    }

    #[test]
    fn test_codes_follow_the_failing_stage() {
        let missing = StepError::ToolchainProbe(ToolchainError::SwiftNotFound("swift".to_string()));
        assert_eq!(missing.code(), ErrorCode::CommandNotFound);
        assert_eq!(StepError::Process { exit_code: 65 }.code(), ErrorCode::CommandFailed);
        assert_eq!(
            StepError::Spawn(swiftstep_core::Error::process("fork failed")).code(),
            ErrorCode::ProcessError
        );
    }

    #[test]
    fn test_every_failure_exits_one() {
        let errors = [
            StepError::Process { exit_code: 2 },
            StepError::ToolchainProbe(ToolchainError::SwiftNotFound("swift".to_string())),
            StepError::Spawn(swiftstep_core::Error::command_not_found("swift")),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), 1);
        }
    }
}
