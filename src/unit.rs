//! The executable unit abstraction.
//!
//! An [`ExecutableUnit`] turns an instruction plus a context into a result
//! string, or fails. Agents implement it; the orchestrator treats it as
//! opaque and only ever looks at the text of a failure.

use std::fmt;
use std::sync::Arc;

use crate::context::Context;

/// Anything that can carry out a single workflow step.
pub trait ExecutableUnit: Send + Sync {
    /// Identity shown in workflow visualizations.
    fn name(&self) -> &str;

    /// Execute the instruction.
    ///
    /// Must return `Err` rather than a sentinel value on failure. Every error
    /// is treated as retryable by the orchestrator.
    fn execute(&self, instruction: &str, context: &Context) -> anyhow::Result<String>;
}

/// A unit shared between the workflow and whoever created it.
pub type SharedUnit = Arc<dyn ExecutableUnit>;

/// Adapts a closure into an [`ExecutableUnit`].
///
/// # Example
///
/// ```
/// use grc_flow::context::Context;
/// use grc_flow::unit::{ExecutableUnit, FnUnit};
///
/// let unit = FnUnit::new("echo", |instruction: &str, _ctx: &Context| {
///     Ok(format!("OK:{}", instruction))
/// });
/// assert_eq!(unit.execute("ping", &Context::new()).unwrap(), "OK:ping");
/// ```
pub struct FnUnit<F> {
    name: String,
    func: F,
}

impl<F> FnUnit<F>
where
    F: Fn(&str, &Context) -> anyhow::Result<String> + Send + Sync,
{
    /// Wrap a closure under the given display name.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> ExecutableUnit for FnUnit<F>
where
    F: Fn(&str, &Context) -> anyhow::Result<String> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, instruction: &str, context: &Context) -> anyhow::Result<String> {
        (self.func)(instruction, context)
    }
}

impl<F> fmt::Debug for FnUnit<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnUnit").field("name", &self.name).finish()
    }
}
