//! Workflow execution orchestration.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use chrono::Utc;

use crate::context::{self, Context};
use crate::error::{FlowError, Result};
use crate::steps::{template, Step};

use super::dependency::DependencyGraph;
use super::events::{EventSink, TracingSink, WorkflowEvent};
use super::result::{WorkflowRun, WorkflowStats, WORKFLOW_ERROR_KEY};

/// Retries per step when none are requested.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Name given to workflows created through `Default`.
pub const DEFAULT_WORKFLOW_NAME: &str = "default_workflow";

/// Options for a single run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Initial context variables.
    pub context: Context,
    /// Extra attempts after a failed one (total attempts = max_retries + 1).
    pub max_retries: u32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            context: Context::new(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl RunOptions {
    /// Options with the given context and default retries.
    pub fn with_context(context: Context) -> Self {
        Self {
            context,
            ..Default::default()
        }
    }
}

/// Outcome of running one step through its attempts.
struct StepOutcome {
    attempts: u32,
    result: std::result::Result<String, String>,
}

/// Orchestrates a named collection of interdependent steps.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use grc_flow::context::Context;
/// use grc_flow::runner::WorkflowOrchestrator;
/// use grc_flow::steps::Step;
/// use grc_flow::unit::FnUnit;
/// use serde_json::json;
///
/// let echo = Arc::new(FnUnit::new("echo", |i: &str, _: &Context| Ok(format!("OK:{}", i))));
///
/// let mut workflow = WorkflowOrchestrator::new("privacy");
/// workflow.add_step(Step::new("research", echo.clone(), "Research {topic}")).unwrap();
/// workflow
///     .add_step(Step::new("analyze", echo, "Analyze {research}").depends_on(["research"]))
///     .unwrap();
///
/// let mut ctx = Context::new();
/// ctx.insert("topic".to_string(), json!("privacy"));
/// let run = workflow.execute(ctx);
///
/// assert!(run.success);
/// assert_eq!(run.results["analyze"], "OK:Analyze OK:Research privacy");
/// ```
pub struct WorkflowOrchestrator {
    name: String,
    steps: BTreeMap<String, Step>,
    history: Vec<WorkflowRun>,
    sink: Box<dyn EventSink>,
}

impl WorkflowOrchestrator {
    /// Create an empty workflow that reports through `tracing`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: BTreeMap::new(),
            history: Vec::new(),
            sink: Box::new(TracingSink),
        }
    }

    /// Replace the event sink.
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Workflow name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered steps, ordered by name.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.values()
    }

    /// Look up a step by name.
    pub fn step(&self, name: &str) -> Option<&Step> {
        self.steps.get(name)
    }

    /// Number of registered steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no steps are registered.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs recorded so far, oldest first.
    pub fn history(&self) -> &[WorkflowRun] {
        &self.history
    }

    /// Register a step.
    ///
    /// Dependencies on steps that are not registered yet are accepted and
    /// reported as [`WorkflowEvent::ForwardDependency`].
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::DuplicateStep`] if the name is taken.
    pub fn add_step(&mut self, step: Step) -> Result<()> {
        if self.steps.contains_key(&step.name) {
            return Err(FlowError::DuplicateStep { name: step.name });
        }

        for dep in &step.depends_on {
            if dep != &step.name && !self.steps.contains_key(dep) {
                self.sink.emit(&WorkflowEvent::ForwardDependency {
                    workflow: self.name.clone(),
                    step: step.name.clone(),
                    dependency: dep.clone(),
                });
            }
        }

        self.sink.emit(&WorkflowEvent::StepAdded {
            workflow: self.name.clone(),
            step: step.name.clone(),
        });
        self.steps.insert(step.name.clone(), step);
        Ok(())
    }

    /// Build the dependency graph of the registered steps.
    pub fn graph(&self) -> DependencyGraph {
        self.steps
            .values()
            .fold(DependencyGraph::builder(), |builder, step| {
                builder.add_step(step.name.clone(), step.depends_on.iter().cloned())
            })
            .build()
    }

    /// Compute the execution order.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::CyclicDependency`] if the steps form a cycle.
    pub fn execution_order(&self) -> Result<Vec<String>> {
        self.graph().topological_order()
    }

    /// Run the workflow with default retries.
    pub fn execute(&mut self, context: Context) -> WorkflowRun {
        self.execute_with(&RunOptions::with_context(context))
    }

    /// Run the workflow.
    ///
    /// Never fails: cycles, blocked steps, and step failures are all recorded
    /// in the returned run, which is also appended to the history.
    pub fn execute_with(&mut self, options: &RunOptions) -> WorkflowRun {
        let started_at = Utc::now();
        let start = Instant::now();
        let total_steps = self.steps.len();

        self.sink.emit(&WorkflowEvent::RunStarted {
            workflow: self.name.clone(),
            total_steps,
        });

        let order = match self.execution_order() {
            Ok(order) => order,
            Err(e) => {
                self.sink.emit(&WorkflowEvent::OrderingFailed {
                    workflow: self.name.clone(),
                    message: e.to_string(),
                });

                let mut errors = BTreeMap::new();
                errors.insert(WORKFLOW_ERROR_KEY.to_string(), e.to_string());

                let run = WorkflowRun {
                    workflow: self.name.clone(),
                    success: false,
                    results: BTreeMap::new(),
                    errors,
                    execution_order: Vec::new(),
                    total_steps,
                    attempts: BTreeMap::new(),
                    started_at,
                    duration_ms: start.elapsed().as_millis() as u64,
                };
                self.history.push(run.clone());
                return run;
            }
        };

        let mut results: BTreeMap<String, String> = BTreeMap::new();
        let mut errors: BTreeMap<String, String> = BTreeMap::new();
        let mut attempts: BTreeMap<String, u32> = BTreeMap::new();

        for step_name in &order {
            let Some(step) = self.steps.get(step_name) else {
                continue;
            };

            let current = context::merge(&options.context, &results);

            if !step.should_run(&current) {
                self.sink.emit(&WorkflowEvent::StepSkipped {
                    step: step_name.clone(),
                });
                continue;
            }

            let mut missing: Vec<String> = Vec::new();
            for dep in &step.depends_on {
                if !results.contains_key(dep) && !missing.contains(dep) {
                    missing.push(dep.clone());
                }
            }
            if !missing.is_empty() {
                errors.insert(
                    step_name.clone(),
                    format!("Dependencies not satisfied: {}", missing.join(", ")),
                );
                self.sink.emit(&WorkflowEvent::StepBlocked {
                    step: step_name.clone(),
                    missing,
                });
                continue;
            }

            let outcome = run_step(step, &current, options.max_retries, &mut *self.sink);
            attempts.insert(step_name.clone(), outcome.attempts);

            match outcome.result {
                Ok(text) => {
                    self.sink.emit(&WorkflowEvent::StepCompleted {
                        step: step_name.clone(),
                        attempts: outcome.attempts,
                    });
                    results.insert(step_name.clone(), text);
                }
                Err(message) => {
                    self.sink.emit(&WorkflowEvent::StepFailed {
                        step: step_name.clone(),
                        attempts: outcome.attempts,
                        error: message.clone(),
                    });
                    errors.insert(step_name.clone(), message);
                }
            }
        }

        self.sink.emit(&WorkflowEvent::RunFinished {
            workflow: self.name.clone(),
            succeeded: results.len(),
            failed: errors.len(),
        });

        let run = WorkflowRun {
            workflow: self.name.clone(),
            success: errors.is_empty(),
            results,
            errors,
            execution_order: order,
            total_steps,
            attempts,
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        self.history.push(run.clone());
        run
    }

    /// Text rendering of the workflow in execution order.
    ///
    /// Returns a short diagnostic instead when the steps form a cycle.
    pub fn visualize(&self) -> String {
        let order = match self.execution_order() {
            Ok(order) => order,
            Err(_) => return "Error: Circular dependencies in workflow".to_string(),
        };

        let mut lines = vec![
            format!("Workflow: {}", self.name),
            "=".repeat(50),
            String::new(),
        ];

        for (index, step_name) in order.iter().enumerate() {
            let Some(step) = self.steps.get(step_name) else {
                continue;
            };

            lines.push(format!("{}. {}", index + 1, step_name));
            lines.push(format!("   Agent: {}", step.unit.name()));
            lines.push(format!("   Task: {}", step.task_template));
            if !step.depends_on.is_empty() {
                lines.push(format!("   Depends on: {}", step.depends_on.join(", ")));
            }
            if step.is_conditional() {
                lines.push("   Conditional: Yes".to_string());
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }

    /// Statistics over the run history.
    pub fn stats(&self) -> WorkflowStats {
        WorkflowStats::from_history(&self.name, self.steps.len(), &self.history)
    }

    /// Discard the run history. Registered steps are kept.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.sink.emit(&WorkflowEvent::HistoryCleared {
            workflow: self.name.clone(),
        });
    }
}

/// Render and invoke one step, retrying up to `max_retries` extra times.
fn run_step(
    step: &Step,
    context: &Context,
    max_retries: u32,
    sink: &mut dyn EventSink,
) -> StepOutcome {
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        sink.emit(&WorkflowEvent::AttemptStarted {
            step: step.name.clone(),
            attempt,
        });

        let result = template::render(&step.task_template, context)
            .map_err(|e| e.to_string())
            .and_then(|instruction| {
                step.unit
                    .execute(&instruction, context)
                    .map_err(|e| e.to_string())
            });

        match result {
            Ok(text) => {
                return StepOutcome {
                    attempts: attempt,
                    result: Ok(text),
                };
            }
            Err(message) => {
                sink.emit(&WorkflowEvent::AttemptFailed {
                    step: step.name.clone(),
                    attempt,
                    error: message.clone(),
                });
                if attempt > max_retries {
                    return StepOutcome {
                        attempts: attempt,
                        result: Err(message),
                    };
                }
            }
        }
    }
}

impl Default for WorkflowOrchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_WORKFLOW_NAME)
    }
}

impl fmt::Display for WorkflowOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WorkflowOrchestrator('{}', {} steps)",
            self.name,
            self.steps.len()
        )
    }
}

impl fmt::Debug for WorkflowOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowOrchestrator")
            .field("name", &self.name)
            .field("steps", &self.steps.values().collect::<Vec<_>>())
            .field("history", &self.history.len())
            .finish()
    }
}
