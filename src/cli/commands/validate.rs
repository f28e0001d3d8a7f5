//! Validate command implementation.
//!
//! `grcflow validate` reports every problem in a workflow file.

use crate::cli::args::ValidateArgs;
use crate::config::{validate_workflow, Severity};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{load_or_report, Command, CommandResult};

/// The validate command implementation.
pub struct ValidateCommand {
    args: ValidateArgs,
}

impl ValidateCommand {
    /// Create a new validate command.
    pub fn new(args: ValidateArgs) -> Self {
        Self { args }
    }
}

impl Command for ValidateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let file = match load_or_report(&self.args.file, ui) {
            Ok(file) => file,
            Err(result) => return Ok(result),
        };

        let findings = validate_workflow(&file);
        let mut errors = 0;

        for finding in &findings {
            let line = format!("[{}] {}", finding.rule, finding.message);
            match finding.severity {
                Severity::Error => {
                    errors += 1;
                    ui.error(&line);
                }
                Severity::Warning => ui.warning(&line),
            }
        }

        if errors > 0 {
            ui.message(&format!(
                "{} error(s), {} warning(s)",
                errors,
                findings.len() - errors
            ));
            return Ok(CommandResult::failure(1));
        }

        ui.success(&format!(
            "{} is valid ({} steps)",
            self.args.file.display(),
            file.steps.len()
        ));
        Ok(CommandResult::success())
    }
}
