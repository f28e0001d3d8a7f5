//! Building an orchestrator from a workflow file.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::agents::{MultiStepAgent, SharedGenerator, SimpleAgent};
use crate::config::schema::{AgentKind, AgentSpec, WorkflowFile};
use crate::error::{FlowError, Result};
use crate::runner::WorkflowOrchestrator;
use crate::steps::Step;
use crate::unit::SharedUnit;

/// Create the agent described by `spec`.
pub fn build_agent(key: &str, spec: &AgentSpec, generator: SharedGenerator) -> SharedUnit {
    match spec.kind {
        AgentKind::Simple => Arc::new(SimpleAgent::new(spec.simple_config(key), generator)),
        AgentKind::PolicyDrafting => {
            let agent = MultiStepAgent::policy_drafting(generator);
            let config = spec.apply(agent.config().clone());
            Arc::new(agent.with_config(config))
        }
        AgentKind::RiskAssessment => {
            let agent = MultiStepAgent::risk_assessment(generator);
            let config = spec.apply(agent.config().clone());
            Arc::new(agent.with_config(config))
        }
    }
}

/// Build an orchestrator for `file`.
///
/// Each agent is created once and shared by every step that uses it.
///
/// # Errors
///
/// Returns `UnknownAgent` if a step names an undefined agent and
/// `DuplicateStep` if two steps share a name.
pub fn build_orchestrator(
    file: &WorkflowFile,
    generator: SharedGenerator,
) -> Result<WorkflowOrchestrator> {
    let units: BTreeMap<&str, SharedUnit> = file
        .agents
        .iter()
        .map(|(key, spec)| (key.as_str(), build_agent(key, spec, generator.clone())))
        .collect();

    let mut workflow = match &file.name {
        Some(name) => WorkflowOrchestrator::new(name.clone()),
        None => WorkflowOrchestrator::default(),
    };

    for spec in &file.steps {
        let unit = units
            .get(spec.agent.as_str())
            .cloned()
            .ok_or_else(|| FlowError::UnknownAgent {
                name: spec.agent.clone(),
            })?;

        let step = Step::new(spec.name.clone(), unit, spec.task.clone())
            .depends_on(spec.depends_on.iter().cloned())
            .with_condition(spec.when.as_ref().map(|c| c.to_condition()));

        workflow.add_step(step)?;
    }

    Ok(workflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::EchoGenerator;
    use crate::config::parse_workflow;
    use std::path::Path;

    const YAML: &str = r#"
name: vendor-review
settings:
  max_retries: 0
context:
  vendor: Acme
agents:
  researcher:
    role: research
  assessor:
    kind: risk_assessment
    name: Vendor Risk
steps:
  - name: research
    agent: researcher
    task: "Research {vendor}"
  - name: risk
    agent: assessor
    task: "Assess {research}"
    depends_on: [research]
  - name: escalate
    agent: researcher
    task: "Escalate {risk}"
    depends_on: [risk]
    when:
      key: escalate
      equals: true
"#;

    fn echo() -> SharedGenerator {
        Arc::new(EchoGenerator::new())
    }

    #[test]
    fn builds_steps_in_order() {
        let file = parse_workflow(YAML, Path::new("t.yml")).unwrap();
        let workflow = build_orchestrator(&file, echo()).unwrap();

        assert_eq!(workflow.name(), "vendor-review");
        assert_eq!(
            workflow.execution_order().unwrap(),
            vec!["research", "risk", "escalate"]
        );
        assert_eq!(workflow.step("risk").unwrap().unit.name(), "Vendor Risk");
        assert!(workflow.step("escalate").unwrap().is_conditional());
    }

    #[test]
    fn agents_are_shared_between_steps() {
        let file = parse_workflow(YAML, Path::new("t.yml")).unwrap();
        let workflow = build_orchestrator(&file, echo()).unwrap();

        let a = &workflow.step("research").unwrap().unit;
        let b = &workflow.step("escalate").unwrap().unit;
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn runs_with_file_options() {
        let file = parse_workflow(YAML, Path::new("t.yml")).unwrap();
        let mut workflow = build_orchestrator(&file, echo()).unwrap();

        let run = workflow.execute_with(&file.run_options());

        assert!(run.success, "errors: {:?}", run.errors);
        assert!(run.results["research"].starts_with("Research Acme"));
        assert!(run.results["risk"].starts_with("# Risk Assessment Report"));
        assert_eq!(run.skipped(), vec!["escalate"]);
    }

    #[test]
    fn unknown_agent_fails() {
        let yaml = "steps:\n  - name: a\n    agent: ghost\n    task: x\n";
        let file = parse_workflow(yaml, Path::new("t.yml")).unwrap();

        let result = build_orchestrator(&file, echo());
        assert!(matches!(result, Err(FlowError::UnknownAgent { ref name }) if name == "ghost"));
    }

    #[test]
    fn duplicate_step_fails() {
        let yaml = "agents:\n  a: {}\nsteps:\n  - {name: s, agent: a, task: x}\n  - {name: s, agent: a, task: y}\n";
        let file = parse_workflow(yaml, Path::new("t.yml")).unwrap();

        assert!(matches!(
            build_orchestrator(&file, echo()),
            Err(FlowError::DuplicateStep { .. })
        ));
    }

    #[test]
    fn unnamed_file_uses_default_name() {
        let file = parse_workflow("{}", Path::new("t.yml")).unwrap();
        let workflow = build_orchestrator(&file, echo()).unwrap();
        assert_eq!(workflow.name(), "default_workflow");
    }
}
