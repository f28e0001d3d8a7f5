//! Structured events emitted while building and running a workflow.
//!
//! The orchestrator never logs directly. It hands every event to the
//! [`EventSink`] it owns; [`TracingSink`] forwards them to `tracing`, and
//! [`MemorySink`] keeps them for inspection.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Events emitted by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WorkflowEvent {
    /// A step was registered.
    StepAdded { workflow: String, step: String },
    /// A step depends on a name that is not registered yet.
    ForwardDependency {
        workflow: String,
        step: String,
        dependency: String,
    },
    /// A run is starting.
    RunStarted { workflow: String, total_steps: usize },
    /// No execution order could be computed.
    OrderingFailed { workflow: String, message: String },
    /// A step's condition evaluated false.
    StepSkipped { step: String },
    /// A step could not run because dependencies produced no result.
    StepBlocked { step: String, missing: Vec<String> },
    /// An attempt is about to start (1-based).
    AttemptStarted { step: String, attempt: u32 },
    /// An attempt failed.
    AttemptFailed {
        step: String,
        attempt: u32,
        error: String,
    },
    /// A step produced a result.
    StepCompleted { step: String, attempts: u32 },
    /// A step exhausted its attempts.
    StepFailed {
        step: String,
        attempts: u32,
        error: String,
    },
    /// A run finished.
    RunFinished {
        workflow: String,
        succeeded: usize,
        failed: usize,
    },
    /// Run history was discarded.
    HistoryCleared { workflow: String },
}

/// Receiver for workflow events.
pub trait EventSink: Send {
    /// Handle one event.
    fn emit(&mut self, event: &WorkflowEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&WorkflowEvent) + Send,
{
    fn emit(&mut self, event: &WorkflowEvent) {
        self(event)
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: &WorkflowEvent) {
        match event {
            WorkflowEvent::StepAdded { workflow, step } => {
                info!("Added step '{}' to workflow '{}'", step, workflow);
            }
            WorkflowEvent::ForwardDependency {
                step, dependency, ..
            } => {
                warn!(
                    "Step '{}' depends on '{}', which is not yet added to the workflow",
                    step, dependency
                );
            }
            WorkflowEvent::RunStarted {
                workflow,
                total_steps,
            } => {
                info!(
                    "Starting workflow '{}' with {} steps",
                    workflow, total_steps
                );
            }
            WorkflowEvent::OrderingFailed { workflow, message } => {
                error!("Workflow '{}' cannot be ordered: {}", workflow, message);
            }
            WorkflowEvent::StepSkipped { step } => {
                info!("Skipping step '{}' (condition not met)", step);
            }
            WorkflowEvent::StepBlocked { step, missing } => {
                error!(
                    "Step '{}' blocked: dependencies not satisfied: {}",
                    step,
                    missing.join(", ")
                );
            }
            WorkflowEvent::AttemptStarted { step, attempt } => {
                debug!("Executing step '{}' (attempt {})", step, attempt);
            }
            WorkflowEvent::AttemptFailed {
                step,
                attempt,
                error,
            } => {
                warn!("Step '{}' failed (attempt {}): {}", step, attempt, error);
            }
            WorkflowEvent::StepCompleted { step, attempts } => {
                info!("Step '{}' completed after {} attempt(s)", step, attempts);
            }
            WorkflowEvent::StepFailed {
                step,
                attempts,
                error,
            } => {
                error!(
                    "Step '{}' failed after {} attempt(s): {}",
                    step, attempts, error
                );
            }
            WorkflowEvent::RunFinished {
                workflow,
                succeeded,
                failed,
            } => {
                info!(
                    "Workflow '{}' completed: {} successful, {} failed",
                    workflow, succeeded, failed
                );
            }
            WorkflowEvent::HistoryCleared { workflow } => {
                info!("Cleared execution history for workflow '{}'", workflow);
            }
        }
    }
}

/// Records events in memory.
///
/// Clones share the same buffer, so one handle can be given to the
/// orchestrator while another is kept for assertions.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<WorkflowEvent>>>,
}

impl MemorySink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events.
    pub fn events(&self) -> Vec<WorkflowEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl EventSink for MemorySink {
    fn emit(&mut self, event: &WorkflowEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}
