//! Ready-made workflows.

use std::sync::Arc;

use crate::agents::{AgentRole, SharedGenerator, SimpleAgent};
use crate::error::Result;
use crate::steps::Step;

use super::orchestrator::WorkflowOrchestrator;

/// Name of the workflow built by [`grc_document_workflow`].
pub const GRC_DOCUMENT_WORKFLOW: &str = "GRC Document Workflow";

/// Research, analyze, generate, and review a GRC document.
///
/// Expects a `task` variable in the run context.
pub fn grc_document_workflow(generator: SharedGenerator) -> Result<WorkflowOrchestrator> {
    let agent = |role| Arc::new(SimpleAgent::from_role(role, generator.clone()));

    let mut workflow = WorkflowOrchestrator::new(GRC_DOCUMENT_WORKFLOW);
    workflow.add_step(Step::new(
        "research",
        agent(AgentRole::Research),
        "Research: {task}",
    ))?;
    workflow.add_step(
        Step::new(
            "analyze",
            agent(AgentRole::Analysis),
            "Analyze requirements based on: {research}",
        )
        .depends_on(["research"]),
    )?;
    workflow.add_step(
        Step::new(
            "generate",
            agent(AgentRole::Generation),
            "Generate document based on: {analyze}",
        )
        .depends_on(["analyze"]),
    )?;
    workflow.add_step(
        Step::new(
            "review",
            agent(AgentRole::Review),
            "Review and improve: {generate}",
        )
        .depends_on(["generate"]),
    )?;

    Ok(workflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::EchoGenerator;
    use crate::context::Context;
    use serde_json::json;

    #[test]
    fn document_workflow_order() {
        let workflow = grc_document_workflow(Arc::new(EchoGenerator::new())).unwrap();
        assert_eq!(workflow.name(), GRC_DOCUMENT_WORKFLOW);
        assert_eq!(
            workflow.execution_order().unwrap(),
            vec!["research", "analyze", "generate", "review"]
        );
        assert_eq!(workflow.step("review").unwrap().unit.name(), "Review Agent");
    }

    #[test]
    fn document_workflow_threads_results() {
        let mut workflow = grc_document_workflow(Arc::new(EchoGenerator::new())).unwrap();
        let mut ctx = Context::new();
        ctx.insert("task".to_string(), json!("Data retention policy"));

        let run = workflow.execute(ctx);

        assert!(run.success, "errors: {:?}", run.errors);
        assert!(run.results["research"].starts_with("Research: Data retention policy"));
        assert!(run.results["review"].starts_with("Review and improve: Generate document based on:"));
    }

    #[test]
    fn document_workflow_without_task_fails_first_step() {
        let mut workflow = grc_document_workflow(Arc::new(EchoGenerator::new())).unwrap();
        let run = workflow.execute(Context::new());

        assert!(run.errors["research"].contains("task"));
        assert_eq!(run.errors["analyze"], "Dependencies not satisfied: research");
    }
}
