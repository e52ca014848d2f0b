//! # Dashstats CLI
//!
//! Command line front end that prints dashboard reports as JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
#[allow(missing_docs)]
pub mod cli;
pub mod error;

pub use app::*;
pub use cli::*;
pub use error::*;
