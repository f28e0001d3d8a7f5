//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::Path;
use std::sync::Arc;

use crate::agents::{EchoGenerator, SharedGenerator};
use crate::cli::args::{Cli, Commands};
use crate::config::{load_workflow_file, WorkflowFile};
use crate::error::{FlowError, Result};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, reporting through `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Load a workflow file, reporting load problems through `ui`.
///
/// A missing file maps to exit code 2, anything else to 1.
pub(crate) fn load_or_report(
    path: &Path,
    ui: &mut dyn UserInterface,
) -> std::result::Result<WorkflowFile, CommandResult> {
    match load_workflow_file(path) {
        Ok(file) => Ok(file),
        Err(FlowError::ConfigNotFound { path }) => {
            ui.error(&format!("Workflow file not found: {}", path.display()));
            Err(CommandResult::failure(2))
        }
        Err(FlowError::ConfigParseError { path, message }) => {
            ui.error(&format!("Parse error in {}: {}", path.display(), message));
            Err(CommandResult::failure(1))
        }
        Err(e) => {
            ui.error(&e.to_string());
            Err(CommandResult::failure(1))
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    generator: SharedGenerator,
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandDispatcher {
    /// Create a dispatcher that builds agents on an [`EchoGenerator`].
    pub fn new() -> Self {
        Self::with_generator(Arc::new(EchoGenerator::new()))
    }

    /// Create a dispatcher that builds agents on `generator`.
    pub fn with_generator(generator: SharedGenerator) -> Self {
        Self { generator }
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Show(args) => {
                let cmd = super::show::ShowCommand::new(args.clone(), self.generator.clone());
                cmd.execute(ui)
            }
            Commands::Validate(args) => {
                let cmd = super::validate::ValidateCommand::new(args.clone());
                cmd.execute(ui)
            }
            Commands::DryRun(args) => {
                let cmd = super::dry_run::DryRunCommand::new(args.clone(), self.generator.clone());
                cmd.execute(ui)
            }
        }
    }
}
