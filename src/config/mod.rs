//! Workflow file loading, validation, and orchestrator construction.
//!
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//! - Validation in [`validator`]
//! - Orchestrator construction in [`build`]
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use std::sync::Arc;
//! use grc_flow::agents::EchoGenerator;
//! use grc_flow::config::{build_orchestrator, parse_workflow, validate};
//!
//! let yaml = r#"
//! agents:
//!   writer:
//!     role: generation
//! steps:
//!   - name: draft
//!     agent: writer
//!     task: "Draft a {kind} policy"
//! context:
//!   kind: retention
//! "#;
//!
//! let file = parse_workflow(yaml, Path::new("workflow.yml")).unwrap();
//! validate(&file).unwrap();
//!
//! let mut workflow = build_orchestrator(&file, Arc::new(EchoGenerator::new())).unwrap();
//! let run = workflow.execute_with(&file.run_options());
//! assert!(run.results["draft"].starts_with("Draft a retention policy"));
//! ```

pub mod build;
pub mod loader;
pub mod schema;
pub mod validator;

pub use build::{build_agent, build_orchestrator};
pub use loader::{load_workflow_file, parse_workflow};
pub use schema::{AgentKind, AgentSpec, ConditionSpec, Settings, StepSpec, WorkflowFile};
pub use validator::{validate, validate_workflow, Severity, ValidationError};
