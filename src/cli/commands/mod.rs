//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`].

pub mod dispatcher;
pub mod dry_run;
pub mod show;
pub mod validate;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
