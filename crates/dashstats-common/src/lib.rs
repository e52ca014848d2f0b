//! # Dashstats Common
//!
//! Shared types, utilities, and common functionality for dashstats.
//!
//! This crate provides the error type, identifier newtypes, calendar helpers
//! and logging setup used across all other crates in the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use types::*;
pub use utils::*;
