//! grc-flow - Multi-agent workflow orchestration for GRC documents.
//!
//! A workflow is a named set of steps. Each step binds an executable unit
//! (usually an agent backed by a text generator) to a task template, may
//! depend on other steps, and may be guarded by a condition. The
//! orchestrator orders steps deterministically, runs them with retries, and
//! threads each result into later templates.
//!
//! # Modules
//!
//! - [`agents`] - Agents and the text generation boundary
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Workflow file loading, validation, and construction
//! - [`context`] - Execution context values
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Ordering, execution, events, and run results
//! - [`steps`] - Step definitions and task templates
//! - [`ui`] - Terminal output
//! - [`unit`] - The executable unit abstraction
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use grc_flow::context::Context;
//! use grc_flow::runner::WorkflowOrchestrator;
//! use grc_flow::steps::Step;
//! use grc_flow::unit::FnUnit;
//!
//! let shout = Arc::new(FnUnit::new("shout", |i: &str, _: &Context| Ok(i.to_uppercase())));
//!
//! let mut workflow = WorkflowOrchestrator::new("demo");
//! workflow.add_step(Step::new("greet", shout, "hello")).unwrap();
//!
//! let run = workflow.execute(Context::new());
//! assert_eq!(run.results["greet"], "HELLO");
//! ```

pub mod agents;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod runner;
pub mod steps;
pub mod ui;
pub mod unit;

pub use error::{FlowError, Result};
