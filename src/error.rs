//! Error types for grc-flow operations.
//!
//! This module defines [`FlowError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `FlowError` for domain errors that callers need to match on
//! - Use `anyhow::Error` at the unit and text-generation boundary, where only
//!   the failure's message is inspected
//! - Failures inside a workflow step never escape `execute`; they end up as
//!   strings in the run's error map

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for grc-flow operations.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A step with this name is already registered.
    #[error("Step '{name}' already exists")]
    DuplicateStep { name: String },

    /// The step graph contains a cycle.
    #[error("Circular dependencies detected in workflow")]
    CyclicDependency,

    /// A task template references a key missing from the context.
    #[error("Template references unknown variable '{variable}'")]
    TemplateResolution { variable: String },

    /// A task template could not be parsed.
    #[error("Malformed template: {message}")]
    MalformedTemplate { message: String },

    /// A workflow step references an agent that was never defined.
    #[error("Unknown agent: {name}")]
    UnknownAgent { name: String },

    /// Workflow file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a workflow file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid workflow structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for grc-flow operations.
pub type Result<T> = std::result::Result<T, FlowError>;
