//! CLI utilities for the swiftstep CI step
//!
//! Provides shared CLI functionality:
//! - Section headers and parameter listings
//! - Status messages
//! - Duration formatting

#![warn(missing_docs)]

pub mod output;
