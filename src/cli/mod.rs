//! Command-line interface for grcflow.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, DryRunArgs, ShowArgs, ValidateArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
