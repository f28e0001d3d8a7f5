//! Dry-run command implementation.
//!
//! `grcflow dry-run` executes a workflow end to end against the dispatcher's
//! text generator (an echo generator from the binary), which shows how
//! context and step results flow through the task templates.

use crate::agents::SharedGenerator;
use crate::cli::args::DryRunArgs;
use crate::config::{build_orchestrator, validate_workflow, Severity, WorkflowFile};
use crate::error::Result;
use crate::runner::{RunOptions, WorkflowRun};
use crate::ui::UserInterface;

use super::dispatcher::{load_or_report, Command, CommandResult};

/// The dry-run command implementation.
pub struct DryRunCommand {
    args: DryRunArgs,
    generator: SharedGenerator,
}

impl DryRunCommand {
    /// Create a new dry-run command.
    pub fn new(args: DryRunArgs, generator: SharedGenerator) -> Self {
        Self { args, generator }
    }

    /// File options overridden by `--set` and `--max-retries`.
    fn run_options(&self, file: &WorkflowFile) -> RunOptions {
        let mut options = file.run_options();
        for (key, value) in &self.args.set {
            options.context.insert(key.clone(), value.clone());
        }
        if let Some(max_retries) = self.args.max_retries {
            options.max_retries = max_retries;
        }
        options
    }

    fn report(&self, run: &WorkflowRun, ui: &mut dyn UserInterface) {
        ui.show_header(&format!("Dry run: {}", run.workflow));

        if let Some(error) = run.workflow_error() {
            ui.error(error);
        }

        for step in &run.execution_order {
            if let Some(output) = run.results.get(step) {
                ui.step_succeeded(step, output);
            } else if let Some(error) = run.errors.get(step) {
                ui.step_failed(step, error);
            } else {
                ui.step_skipped(step);
            }
        }

        if run.success {
            ui.success(&run.summary_line());
        } else {
            ui.error(&run.summary_line());
        }
    }
}

impl Command for DryRunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let file = match load_or_report(&self.args.file, ui) {
            Ok(file) => file,
            Err(result) => return Ok(result),
        };

        let blocking: Vec<_> = validate_workflow(&file)
            .into_iter()
            .filter(|f| f.severity == Severity::Error && f.rule != "circular-dependency")
            .collect();
        if !blocking.is_empty() {
            for finding in &blocking {
                ui.error(&format!("[{}] {}", finding.rule, finding.message));
            }
            return Ok(CommandResult::failure(1));
        }

        let mut workflow = build_orchestrator(&file, self.generator.clone())?;
        let run = workflow.execute_with(&self.run_options(&file));

        if self.args.json {
            let json = serde_json::to_string_pretty(&run).map_err(anyhow::Error::from)?;
            ui.raw(&json);
        } else {
            self.report(&run, ui);
        }

        if run.success {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::EchoGenerator;
    use crate::ui::MockUI;
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    const WORKFLOW: &str = r#"
name: privacy
agents:
  echo:
    system_message: "Echo"
steps:
  - name: research
    agent: echo
    task: "Research {topic}"
  - name: analyze
    agent: echo
    task: "Analyze {research}"
    depends_on: [research]
  - name: escalate
    agent: echo
    task: "Escalate {analyze}"
    depends_on: [analyze]
    when:
      key: escalate
"#;

    fn write(temp: &TempDir, yaml: &str) -> PathBuf {
        let path = temp.path().join("w.yml");
        fs::write(&path, yaml).unwrap();
        path
    }

    fn args(file: PathBuf) -> DryRunArgs {
        DryRunArgs {
            file,
            set: Vec::new(),
            max_retries: None,
            json: false,
        }
    }

    fn command(args: DryRunArgs) -> DryRunCommand {
        DryRunCommand::new(args, Arc::new(EchoGenerator::new()))
    }

    #[test]
    fn runs_with_set_values() {
        let temp = TempDir::new().unwrap();
        let mut args = args(write(&temp, WORKFLOW));
        args.set.push(("topic".to_string(), json!("privacy")));

        let mut ui = MockUI::new();
        let result = command(args).execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.headers(), ["Dry run: privacy"]);
        let steps: Vec<&str> = ui
            .succeeded_steps()
            .iter()
            .map(|(s, _)| s.as_str())
            .collect();
        assert_eq!(steps, vec!["research", "analyze"]);
        assert!(ui.succeeded_steps()[1].1.starts_with("Analyze Research privacy"));
        assert_eq!(ui.skipped_steps(), ["escalate"]);
    }

    #[test]
    fn missing_variable_fails_run() {
        let temp = TempDir::new().unwrap();
        let mut args = args(write(&temp, WORKFLOW));
        args.max_retries = Some(0);

        let mut ui = MockUI::new();
        let result = command(args).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.failed_steps()[0].0, "research");
        assert_eq!(
            ui.failed_steps()[1],
            (
                "analyze".to_string(),
                "Dependencies not satisfied: research".to_string()
            )
        );
    }

    #[test]
    fn json_output_is_the_run() {
        let temp = TempDir::new().unwrap();
        let mut args = args(write(&temp, WORKFLOW));
        args.set.push(("topic".to_string(), json!("privacy")));
        args.set.push(("escalate".to_string(), json!(true)));
        args.json = true;

        let mut ui = MockUI::new();
        let result = command(args).execute(&mut ui).unwrap();

        assert!(result.success);
        let run: serde_json::Value = serde_json::from_str(&ui.raw_output()[0]).unwrap();
        assert_eq!(run["workflow"], "privacy");
        assert_eq!(run["success"], true);
        assert_eq!(run["execution_order"], json!(["research", "analyze", "escalate"]));
        assert_eq!(run["attempts"]["research"], 1);
    }

    #[test]
    fn cycle_is_reported_as_workflow_error() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "agents:\n  a: {}\nsteps:\n  - {name: x, agent: a, task: t, depends_on: [y]}\n  - {name: y, agent: a, task: t, depends_on: [x]}\n",
        );

        let mut ui = MockUI::new();
        let result = command(args(path)).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.errors()[0].contains("Circular dependencies detected"));
    }

    #[test]
    fn invalid_file_is_not_run() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "steps:\n  - {name: x, agent: ghost, task: t}\n");

        let mut ui = MockUI::new();
        let result = command(args(path)).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.errors()[0].starts_with("[unknown-agent]"));
        assert!(ui.headers().is_empty());
    }
}
