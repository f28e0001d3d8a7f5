//! Workflow orchestration.
//!
//! - [`WorkflowOrchestrator`] - Step registry, scheduler, and executor
//! - [`DependencyGraph`] - Deterministic topological ordering
//! - [`WorkflowEvent`] - Structured events handed to an [`EventSink`]
//! - [`WorkflowRun`] - Outcome of one run
//! - [`presets`] - Ready-made workflows

pub mod dependency;
pub mod events;
pub mod orchestrator;
pub mod presets;
pub mod result;

pub use dependency::{DependencyGraph, DependencyGraphBuilder};
pub use events::{EventSink, MemorySink, TracingSink, WorkflowEvent};
pub use orchestrator::{RunOptions, WorkflowOrchestrator, DEFAULT_MAX_RETRIES, DEFAULT_WORKFLOW_NAME};
pub use result::{WorkflowRun, WorkflowStats, WORKFLOW_ERROR_KEY};
