//! Input validation
//!
//! Step inputs arrive as plain strings. [`Validator`] checks them in the
//! order the checks are chained and stops at the first failure, so callers
//! always get a single error naming exactly one input.
//!
//! # Example
//!
//! ```rust
//! use swiftstep_core::validation::{ValidationError, Validator};
//!
//! let result = Validator::new()
//!     .required_with_options("configuration", "release", &["debug", "release"])
//!     .required_with_options("build_tests", "maybe", &["yes", "no"])
//!     .finish();
//!
//! assert!(matches!(result, Err(ValidationError::InvalidInput { .. })));
//! ```

use crate::error::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single failed input check
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// A required input was empty
    #[error("Missing required input: {key}")]
    MissingInput {
        /// Input key
        key: String,
    },

    /// An input held a value outside its option set
    #[error("Invalid input: ({key}) value: ({value}), valid options: {}", .options.join(", "))]
    InvalidInput {
        /// Input key
        key: String,
        /// Value as received
        value: String,
        /// Accepted values in declared order
        options: Vec<String>,
    },
}

impl ValidationError {
    /// Key of the input that failed
    pub fn key(&self) -> &str {
        match self {
            Self::MissingInput { key } | Self::InvalidInput { key, .. } => key,
        }
    }

    /// Error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingInput { .. } => ErrorCode::MissingInput,
            Self::InvalidInput { .. } => ErrorCode::InvalidInput,
        }
    }
}

/// Fluent, short-circuiting validator
///
/// Once a check fails every following check is skipped.
#[derive(Debug, Default)]
pub struct Validator {
    failure: Option<ValidationError>,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a non-empty value
    #[must_use]
    pub fn required(mut self, key: &str, value: &str) -> Self {
        if self.failure.is_none() && value.is_empty() {
            self.failure = Some(ValidationError::MissingInput {
                key: key.to_string(),
            });
        }
        self
    }

    /// Require the value to exactly match one of `options`
    #[must_use]
    pub fn one_of(mut self, key: &str, value: &str, options: &[&str]) -> Self {
        if self.failure.is_none() && !options.contains(&value) {
            self.failure = Some(ValidationError::InvalidInput {
                key: key.to_string(),
                value: value.to_string(),
                options: options.iter().map(ToString::to_string).collect(),
            });
        }
        self
    }

    /// Require a non-empty value that matches one of `options`
    #[must_use]
    pub fn required_with_options(self, key: &str, value: &str, options: &[&str]) -> Self {
        self.required(key, value).one_of(key, value, options)
    }

    /// Complete validation
    ///
    /// # Errors
    ///
    /// Returns the first failed check.
    pub fn finish(self) -> Result<(), ValidationError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
