//! # Dashstats Config
//!
//! Type-safe configuration management for dashstats.
//!
//! This crate provides configuration loading from YAML files, environment
//! variable overrides, and validation of the final values.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::*;
pub use schema::*;
pub use validation::*;
