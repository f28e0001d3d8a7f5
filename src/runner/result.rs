//! Run results and aggregate statistics.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Error-map key for failures that concern the whole workflow.
pub const WORKFLOW_ERROR_KEY: &str = "workflow";

/// Result of one `execute()` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowRun {
    /// Workflow name.
    pub workflow: String,
    /// True iff `errors` is empty.
    pub success: bool,
    /// Step name to result, for steps that executed successfully.
    pub results: BTreeMap<String, String>,
    /// Step name (or [`WORKFLOW_ERROR_KEY`]) to error description.
    pub errors: BTreeMap<String, String>,
    /// Order computed by the scheduler; empty if ordering failed.
    pub execution_order: Vec<String>,
    /// Number of registered steps when the run started.
    pub total_steps: usize,
    /// Attempts made per invoked step.
    pub attempts: BTreeMap<String, u32>,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the run.
    pub duration_ms: u64,
}

impl WorkflowRun {
    /// Number of steps that produced a result.
    pub fn succeeded(&self) -> usize {
        self.results.len()
    }

    /// Number of error entries.
    pub fn failed(&self) -> usize {
        self.errors.len()
    }

    /// Registered steps that neither produced a result nor failed.
    pub fn skipped(&self) -> Vec<&str> {
        self.execution_order
            .iter()
            .filter(|s| !self.results.contains_key(*s) && !self.errors.contains_key(*s))
            .map(String::as_str)
            .collect()
    }

    /// The workflow-level error, if ordering failed.
    pub fn workflow_error(&self) -> Option<&str> {
        self.errors.get(WORKFLOW_ERROR_KEY).map(String::as_str)
    }

    /// One-line summary for display.
    pub fn summary_line(&self) -> String {
        let status = if self.success { '✓' } else { '✗' };
        format!(
            "{} {}: {} of {} steps succeeded, {} failed ({}ms)",
            status,
            self.workflow,
            self.succeeded(),
            self.total_steps,
            self.failed(),
            self.duration_ms
        )
    }
}

/// Aggregate statistics over a workflow's run history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowStats {
    /// Workflow name.
    pub name: String,
    /// Steps currently registered.
    pub total_steps: usize,
    /// Runs in history.
    pub total_executions: usize,
    /// Runs with `success == true`.
    pub successful_executions: usize,
    /// Runs with `success == false`.
    pub failed_executions: usize,
    /// Percentage of successful runs, two decimals; 0.0 without runs.
    pub success_rate: f64,
}

impl WorkflowStats {
    /// Compute statistics from a run history.
    pub fn from_history(name: &str, total_steps: usize, history: &[WorkflowRun]) -> Self {
        let total_executions = history.len();
        let successful_executions = history.iter().filter(|r| r.success).count();

        let success_rate = if total_executions == 0 {
            0.0
        } else {
            let percent = successful_executions as f64 / total_executions as f64 * 100.0;
            (percent * 100.0).round() / 100.0
        };

        Self {
            name: name.to_string(),
            total_steps,
            total_executions,
            successful_executions,
            failed_executions: total_executions - successful_executions,
            success_rate,
        }
    }
}

impl fmt::Display for WorkflowStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} steps, {} runs ({} ok, {} failed, {:.2}% success)",
            self.name,
            self.total_steps,
            self.total_executions,
            self.successful_executions,
            self.failed_executions,
            self.success_rate
        )
    }
}
