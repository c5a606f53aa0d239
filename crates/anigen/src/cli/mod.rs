//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the anigen binary.

mod commands;
mod display;
mod run;

pub use commands::Cli;
pub use run::run;
