//! Tooling & Integration Layer
//!
//! Command-line access to the namespace engine.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
