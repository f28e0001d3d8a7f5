//! Show command implementation.
//!
//! `grcflow show` prints a workflow's steps in execution order.

use crate::agents::SharedGenerator;
use crate::cli::args::ShowArgs;
use crate::config::build_orchestrator;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{load_or_report, Command, CommandResult};

/// The show command implementation.
pub struct ShowCommand {
    args: ShowArgs,
    generator: SharedGenerator,
}

impl ShowCommand {
    /// Create a new show command.
    pub fn new(args: ShowArgs, generator: SharedGenerator) -> Self {
        Self { args, generator }
    }
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let file = match load_or_report(&self.args.file, ui) {
            Ok(file) => file,
            Err(result) => return Ok(result),
        };

        let workflow = match build_orchestrator(&file, self.generator.clone()) {
            Ok(workflow) => workflow,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
        };

        let rendering = workflow.visualize();
        let cyclic = workflow.execution_order().is_err();
        ui.raw(&rendering);

        if cyclic {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::EchoGenerator;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn run(yaml: &str) -> (CommandResult, MockUI) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("w.yml");
        fs::write(&path, yaml).unwrap();

        let cmd = ShowCommand::new(
            ShowArgs { file: path },
            Arc::new(EchoGenerator::new()),
        );
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();
        (result, ui)
    }

    #[test]
    fn prints_visualization() {
        let (result, ui) = run(
            "name: audit\nagents:\n  r: {role: research}\nsteps:\n  - {name: research, agent: r, task: \"Research {topic}\"}\n",
        );

        assert!(result.success);
        let out = &ui.raw_output()[0];
        assert!(out.starts_with("Workflow: audit"));
        assert!(out.contains("1. research"));
        assert!(out.contains("   Agent: Research Agent"));
    }

    #[test]
    fn cycle_fails() {
        let (result, ui) = run(
            "agents:\n  a: {}\nsteps:\n  - {name: x, agent: a, task: t, depends_on: [y]}\n  - {name: y, agent: a, task: t, depends_on: [x]}\n",
        );

        assert_eq!(result.exit_code, 1);
        assert!(ui.raw_output()[0].contains("Circular dependencies"));
    }

    #[test]
    fn unknown_agent_fails() {
        let (result, ui) = run("steps:\n  - {name: x, agent: ghost, task: t}\n");

        assert!(!result.success);
        assert!(ui.errors()[0].contains("ghost"));
    }

    #[test]
    fn missing_file() {
        let cmd = ShowCommand::new(
            ShowArgs {
                file: Path::new("/nonexistent/w.yml").to_path_buf(),
            },
            Arc::new(EchoGenerator::new()),
        );
        let mut ui = MockUI::new();
        assert_eq!(cmd.execute(&mut ui).unwrap().exit_code, 2);
    }
}
