//! Workflow file validation rules.
//!
//! This module validates workflow files for correctness:
//! - Step names must be unique
//! - Steps must reference defined agents
//! - depends_on must reference existing steps, never the step itself
//! - No circular dependencies allowed
//! - Task templates must parse; unknown variables are warned about

use std::collections::BTreeSet;
use std::fmt;

use crate::config::schema::WorkflowFile;
use crate::error::{FlowError, Result};
use crate::runner::DependencyGraph;
use crate::steps::template;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Placeholder may still be supplied at run time.
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Validation finding with context.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable message
    pub message: String,
    /// Step name if the finding is step-specific
    pub step: Option<String>,
    pub severity: Severity,
}

impl ValidationError {
    fn error(rule: &str, step: Option<&str>, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            step: step.map(str::to_string),
            severity: Severity::Error,
        }
    }

    fn warning(rule: &str, step: Option<&str>, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(rule, step, message)
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Validate a workflow file and return every finding.
///
/// Collects all findings rather than stopping at the first one, so users
/// can fix multiple issues at once.
pub fn validate_workflow(file: &WorkflowFile) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_steps(file));
    errors.extend(validate_dependencies(file));
    errors.extend(validate_templates(file));

    errors
}

/// Names, agent references, and dependency references.
fn validate_steps(file: &WorkflowFile) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = BTreeSet::new();
    let names: BTreeSet<&str> = file.steps.iter().map(|s| s.name.as_str()).collect();

    for step in &file.steps {
        let name = step.name.as_str();

        if !seen.insert(name) {
            errors.push(ValidationError::error(
                "duplicate-step",
                Some(name),
                format!("Step '{}' is defined more than once", name),
            ));
        }

        if !file.agents.contains_key(&step.agent) {
            errors.push(ValidationError::error(
                "unknown-agent",
                Some(name),
                format!("Step '{}' uses agent '{}' which is not defined", name, step.agent),
            ));
        }

        for dep in &step.depends_on {
            if dep == &step.name {
                errors.push(ValidationError::error(
                    "self-dependency",
                    Some(name),
                    format!("Step '{}' depends on itself", name),
                ));
            } else if !names.contains(dep.as_str()) {
                errors.push(ValidationError::error(
                    "undefined-dependency",
                    Some(name),
                    format!("Step '{}' depends on '{}' which does not exist", name, dep),
                ));
            }
        }
    }

    errors
}

/// Cycles between distinct steps. Self-loops are reported separately.
fn validate_dependencies(file: &WorkflowFile) -> Vec<ValidationError> {
    let graph = file
        .steps
        .iter()
        .fold(DependencyGraph::builder(), |builder, step| {
            let deps = step.depends_on.iter().filter(|d| **d != step.name).cloned();
            builder.add_step(step.name.clone(), deps)
        })
        .build();

    match graph.find_cycle() {
        Some(cycle) => vec![ValidationError::error(
            "circular-dependency",
            cycle.first().map(String::as_str),
            format!("Circular dependency detected: {}", cycle.join(" -> ")),
        )],
        None => Vec::new(),
    }
}

/// Template syntax and variable references.
fn validate_templates(file: &WorkflowFile) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let known: BTreeSet<&str> = file
        .context
        .keys()
        .map(String::as_str)
        .chain(file.steps.iter().map(|s| s.name.as_str()))
        .collect();

    for step in &file.steps {
        match template::placeholders(&step.task) {
            Ok(vars) => {
                for var in vars.iter().filter(|v| !known.contains(v.as_str())) {
                    errors.push(ValidationError::warning(
                        "unknown-variable",
                        Some(&step.name),
                        format!(
                            "Step '{}' references '{{{}}}' which is neither a context key nor a step",
                            step.name, var
                        ),
                    ));
                }
            }
            Err(e) => errors.push(ValidationError::error(
                "malformed-template",
                Some(&step.name),
                format!("Step '{}' has a malformed task: {}", step.name, e),
            )),
        }
    }

    errors
}

/// Validate and return Result (for convenience).
///
/// Warnings do not fail validation.
///
/// # Errors
///
/// Returns `ConfigValidationError` if any error-severity rule fails.
pub fn validate(file: &WorkflowFile) -> Result<()> {
    let messages: Vec<String> = validate_workflow(file)
        .into_iter()
        .filter(ValidationError::is_error)
        .map(|e| e.message)
        .collect();

    if messages.is_empty() {
        Ok(())
    } else {
        Err(FlowError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{AgentSpec, StepSpec};
    use serde_json::json;

    fn step(name: &str, task: &str, deps: &[&str]) -> StepSpec {
        StepSpec {
            name: name.to_string(),
            agent: "a".to_string(),
            task: task.to_string(),
            depends_on: deps.iter().map(|d| d.to_string()).collect(),
            when: None,
        }
    }

    fn file(steps: Vec<StepSpec>) -> WorkflowFile {
        let mut file = WorkflowFile::default();
        file.agents.insert("a".to_string(), AgentSpec::default());
        file.steps = steps;
        file
    }

    fn rules(file: &WorkflowFile) -> Vec<String> {
        validate_workflow(file).into_iter().map(|e| e.rule).collect()
    }

    #[test]
    fn valid_workflow_returns_no_errors() {
        let mut f = file(vec![step("a", "Research {topic}", &[]), step("b", "{a}", &["a"])]);
        f.context.insert("topic".to_string(), json!("privacy"));

        assert!(validate_workflow(&f).is_empty());
        assert!(validate(&f).is_ok());
    }

    #[test]
    fn detects_duplicate_step() {
        let f = file(vec![step("a", "x", &[]), step("a", "y", &[])]);
        assert!(rules(&f).contains(&"duplicate-step".to_string()));
    }

    #[test]
    fn detects_unknown_agent() {
        let mut s = step("a", "x", &[]);
        s.agent = "ghost".to_string();
        let f = file(vec![s]);

        let errors = validate_workflow(&f);
        assert_eq!(errors[0].rule, "unknown-agent");
        assert!(errors[0].message.contains("ghost"));
    }

    #[test]
    fn detects_self_dependency_once() {
        let f = file(vec![step("a", "x", &["a"])]);
        assert_eq!(rules(&f), vec!["self-dependency"]);
    }

    #[test]
    fn detects_undefined_dependency() {
        let f = file(vec![step("a", "x", &["missing"])]);
        assert_eq!(rules(&f), vec!["undefined-dependency"]);
    }

    #[test]
    fn detects_circular_dependency_with_path() {
        let f = file(vec![step("a", "x", &["b"]), step("b", "y", &["a"])]);

        let errors = validate_workflow(&f);
        let cycle = errors
            .iter()
            .find(|e| e.rule == "circular-dependency")
            .unwrap();
        assert_eq!(cycle.message, "Circular dependency detected: a -> b -> a");
    }

    #[test]
    fn unknown_variable_is_only_a_warning() {
        let f = file(vec![step("a", "Research {topic}", &[])]);

        let errors = validate_workflow(&f);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "unknown-variable");
        assert_eq!(errors[0].severity, Severity::Warning);
        assert!(validate(&f).is_ok());
    }

    #[test]
    fn detects_malformed_template() {
        let f = file(vec![step("a", "Research {topic", &[])]);

        let errors = validate_workflow(&f);
        assert_eq!(errors[0].rule, "malformed-template");
        assert!(validate(&f).is_err());
    }

    #[test]
    fn validate_joins_messages() {
        let f = file(vec![step("a", "x", &["a"]), step("b", "y", &["zz"])]);

        let err = validate(&f).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("depends on itself"));
        assert!(message.contains("'zz'"));
    }
}
