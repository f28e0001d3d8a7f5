//! Workflow step definition.

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::unit::SharedUnit;

/// Predicate deciding whether a step runs during a given run.
pub type Condition = Arc<dyn Fn(&Context) -> bool + Send + Sync>;

/// One node in the workflow graph.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use grc_flow::context::Context;
/// use grc_flow::steps::Step;
/// use grc_flow::unit::FnUnit;
///
/// let unit = Arc::new(FnUnit::new("analyst", |i: &str, _: &Context| Ok(i.to_string())));
/// let step = Step::new("analyze", unit, "Analyze {research}")
///     .depends_on(["research"])
///     .when(|ctx| ctx.contains_key("research"));
///
/// assert_eq!(step.depends_on, vec!["research".to_string()]);
/// assert!(step.is_conditional());
/// ```
#[derive(Clone)]
pub struct Step {
    /// Unique step name.
    pub name: String,
    /// Unit the step delegates to.
    pub unit: SharedUnit,
    /// Instruction template with `{variable}` placeholders.
    pub task_template: String,
    /// Names of steps that must produce a result first.
    pub depends_on: Vec<String>,
    /// Optional guard evaluated against the run context.
    pub condition: Option<Condition>,
}

impl Step {
    /// Create a step with no dependencies and no condition.
    pub fn new(name: impl Into<String>, unit: SharedUnit, task_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit,
            task_template: task_template.into(),
            depends_on: Vec::new(),
            condition: None,
        }
    }

    /// Add dependencies.
    pub fn depends_on<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on.extend(deps.into_iter().map(Into::into));
        self
    }

    /// Guard the step with a condition.
    pub fn when<F>(mut self, condition: F) -> Self
    where
        F: Fn(&Context) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Arc::new(condition));
        self
    }

    /// Guard the step with an already shared condition.
    pub fn with_condition(mut self, condition: Option<Condition>) -> Self {
        self.condition = condition;
        self
    }

    /// Whether the step carries a condition.
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    /// Evaluate the condition; unconditional steps always run.
    pub fn should_run(&self, context: &Context) -> bool {
        self.condition.as_ref().is_none_or(|cond| cond(context))
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("unit", &self.unit.name())
            .field("task_template", &self.task_template)
            .field("depends_on", &self.depends_on)
            .field("conditional", &self.is_conditional())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::FnUnit;
    use serde_json::json;

    fn unit() -> SharedUnit {
        Arc::new(FnUnit::new("TestAgent", |i: &str, _: &Context| Ok(i.to_string())))
    }

    #[test]
    fn new_step_has_defaults() {
        let step = Step::new("step1", unit(), "Test task");
        assert_eq!(step.name, "step1");
        assert_eq!(step.task_template, "Test task");
        assert!(step.depends_on.is_empty());
        assert!(!step.is_conditional());
    }

    #[test]
    fn depends_on_accumulates() {
        let step = Step::new("c", unit(), "Task")
            .depends_on(["a"])
            .depends_on(vec!["b".to_string()]);
        assert_eq!(step.depends_on, vec!["a", "b"]);
    }

    #[test]
    fn unconditional_step_always_runs() {
        let step = Step::new("s", unit(), "Task");
        assert!(step.should_run(&Context::new()));
    }

    #[test]
    fn condition_is_evaluated_against_context() {
        let step = Step::new("s", unit(), "Task")
            .when(|ctx| ctx.get("run").and_then(|v| v.as_bool()).unwrap_or(false));

        let mut ctx = Context::new();
        assert!(!step.should_run(&ctx));

        ctx.insert("run".to_string(), json!(true));
        assert!(step.should_run(&ctx));
    }

    #[test]
    fn debug_shows_unit_name() {
        let step = Step::new("s", unit(), "Task");
        let debug = format!("{:?}", step);
        assert!(debug.contains("TestAgent"));
    }
}
