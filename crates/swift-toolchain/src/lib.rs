//! Swift toolchain support for the swiftstep CI step
//!
//! This crate provides functionality to:
//! - Detect the installed Swift version and target triple
//! - Assemble `swift build` invocations from typed options
//! - Render those invocations for audit logs before running them

pub mod build;
pub mod detect;
pub mod error;

pub use build::{BuildCommand, BuildConfiguration};
pub use detect::{SwiftToolchain, SwiftVersion};
pub use error::{Result, ToolchainError};

/// Default Swift executable name, resolved through `PATH`
pub const DEFAULT_SWIFT_PROGRAM: &str = "swift";
