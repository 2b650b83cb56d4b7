//! Core utilities for the swiftstep CI step
//!
//! This crate provides the shared pieces every other crate builds on:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Validation**: short-circuiting checks over raw step inputs
//! - **Process execution**: captured, streamed, and stdin-fed commands
//!
//! # Example
//!
//! ```rust
//! use swiftstep_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("build_path", "/tmp/out")
//!     .one_of("build_tests", "yes", &["yes", "no"])
//!     .finish();
//!
//! assert!(result.is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod process;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::process::{run_command, run_command_streaming, CommandResult};
    pub use crate::validation::{ValidationError, Validator};
}
