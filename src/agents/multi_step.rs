//! Agents that chain several generation calls.
//!
//! Each [`Phase`] renders its prompt against the agent defaults, the run
//! context, the task (as `{task}`), and the outputs of earlier phases (by
//! phase name). The agent returns either the last phase output or a rendered
//! report template.

use std::fmt;
use std::sync::Mutex;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::context::Context;
use crate::steps::template;
use crate::unit::ExecutableUnit;

use super::config::AgentConfig;
use super::llm::{GenerationOptions, SharedGenerator};
use super::state::{self, AgentState, MessageRole, StateSummary};

/// One generation call within a multi-step agent.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    /// Name under which the output is available to later phases.
    pub name: String,
    pub system_message: String,
    pub temperature: f32,
    pub prompt_template: String,
}

impl Phase {
    pub fn new(
        name: impl Into<String>,
        system_message: impl Into<String>,
        temperature: f32,
        prompt_template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            system_message: system_message.into(),
            temperature,
            prompt_template: prompt_template.into(),
        }
    }
}

/// Agent running an ordered list of phases.
pub struct MultiStepAgent {
    config: AgentConfig,
    generator: SharedGenerator,
    phases: Vec<Phase>,
    defaults: Context,
    report_template: Option<String>,
    state: Mutex<AgentState>,
}

impl MultiStepAgent {
    pub fn new(config: AgentConfig, generator: SharedGenerator) -> Self {
        Self {
            config,
            generator,
            phases: Vec::new(),
            defaults: Context::new(),
            report_template: None,
            state: Mutex::new(AgentState::default()),
        }
    }

    /// Replace the agent configuration, keeping phases and defaults.
    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phases.push(phase);
        self
    }

    /// Value used when the run context does not supply `key`.
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// Render the final result from this template instead of returning the
    /// last phase output.
    pub fn with_report(mut self, template: impl Into<String>) -> Self {
        self.report_template = Some(template.into());
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn state(&self) -> AgentState {
        state::lock(&self.state).clone()
    }

    pub fn summary(&self) -> StateSummary {
        state::lock(&self.state).summary(&self.config.name)
    }

    pub fn reset(&self) {
        state::lock(&self.state).reset();
    }

    /// Research, draft, and refine a policy document.
    pub fn policy_drafting(generator: SharedGenerator) -> Self {
        let config = AgentConfig::new("Policy Drafting Agent", "You are a policy writing expert.")
            .with_description("Creates comprehensive policy documents")
            .with_temperature(0.7);

        Self::new(config, generator)
            .with_default("framework", "General compliance")
            .with_default("industry", "General")
            .with_phase(Phase::new(
                "research",
                "You are a policy research expert.",
                0.3,
                "Research requirements for this policy:\n\n{task}\n\n\
                 Framework: {framework}\nIndustry: {industry}\n\n\
                 Identify:\n\
                 1. Required sections\n\
                 2. Regulatory requirements\n\
                 3. Industry best practices\n\
                 4. Key stakeholders",
            ))
            .with_phase(Phase::new(
                "draft",
                "You are a professional policy writer.",
                0.7,
                "Based on this research:\n\n{research}\n\n\
                 Create a comprehensive policy document with these sections:\n\
                 1. Purpose and Scope\n\
                 2. Definitions\n\
                 3. Policy Statements\n\
                 4. Roles and Responsibilities\n\
                 5. Procedures\n\
                 6. Compliance and Enforcement\n\
                 7. Review and Updates\n\n\
                 Original requirements: {task}",
            ))
            .with_phase(Phase::new(
                "review",
                "You are a policy review expert.",
                0.5,
                "Review this policy draft:\n\n{draft}\n\n\
                 Improve:\n\
                 1. Clarity and readability\n\
                 2. Completeness\n\
                 3. Professional tone\n\
                 4. Specific and actionable language\n\n\
                 Provide the improved version.",
            ))
    }

    /// Identify, score, and dramatize a risk, then recommend controls.
    pub fn risk_assessment(generator: SharedGenerator) -> Self {
        let config = AgentConfig::new("Risk Assessment Agent", "You are a risk management expert.")
            .with_description("Performs comprehensive risk assessments")
            .with_temperature(0.6);

        Self::new(config, generator)
            .with_default("industry", "General")
            .with_default("controls", "None specified")
            .with_phase(Phase::new(
                "factors",
                "You are a risk identification expert.",
                0.4,
                "Identify risk factors for:\n\n{task}\n\n\
                 Industry: {industry}\nCurrent Controls: {controls}\n\n\
                 List:\n\
                 1. Primary risk factors\n\
                 2. Secondary risk factors\n\
                 3. Stakeholders affected\n\
                 4. Assets at risk",
            ))
            .with_phase(Phase::new(
                "assessment",
                "You are a risk scoring expert.",
                0.3,
                "Based on these risk factors:\n\n{factors}\n\n\
                 Assess:\n\
                 1. Impact (1-5 scale): Financial, Operational, Reputational, Legal\n\
                 2. Likelihood (1-5 scale)\n\
                 3. Overall risk score\n\
                 4. Risk priority (Critical/High/Medium/Low)\n\n\
                 Provide specific reasoning for each rating.",
            ))
            .with_phase(Phase::new(
                "scenario",
                "You are a risk scenario planning expert.",
                0.7,
                "Create a detailed risk scenario:\n\n\
                 Risk: {task}\nAssessment: {assessment}\n\n\
                 Include:\n\
                 1. Initial trigger event\n\
                 2. Timeline of events\n\
                 3. Primary impacts (quantified where possible)\n\
                 4. Cascade effects\n\
                 5. Affected stakeholders",
            ))
            .with_phase(Phase::new(
                "recommended_controls",
                "You are a control design expert.",
                0.5,
                "Based on this risk assessment:\n\n{assessment}\n\n\
                 And this scenario:\n\n{scenario}\n\n\
                 Recommend:\n\
                 1. Preventive controls\n\
                 2. Detective controls\n\
                 3. Corrective controls\n\
                 4. Priority order for implementation\n\
                 5. Estimated effort for each control",
            ))
            .with_report(
                "# Risk Assessment Report\n\n\
                 ## Risk Identified\n{task}\n\n\
                 ## Risk Factors\n{factors}\n\n\
                 ## Risk Assessment\n{assessment}\n\n\
                 ## Risk Scenario\n{scenario}\n\n\
                 ## Recommended Controls\n{recommended_controls}\n",
            )
    }

    fn run_phases(&self, task: &str, context: &Context, state: &mut AgentState) -> anyhow::Result<String> {
        let max = self.config.max_memory_messages;
        let mut vars = self.defaults.clone();
        vars.extend(context.iter().map(|(k, v)| (k.clone(), v.clone())));
        vars.insert("task".to_string(), Value::String(task.to_string()));

        let mut last: Option<String> = None;
        for phase in &self.phases {
            let prompt = template::render(&phase.prompt_template, &vars)?;
            state.add_message(MessageRole::User, prompt.as_str(), max);

            let options = GenerationOptions::with_temperature(phase.temperature);
            let output = self
                .generator
                .generate(&prompt, &phase.system_message, &options)?;

            state.add_message(MessageRole::Assistant, output.as_str(), max);
            debug!("{}: {} phase complete", self.config.name, phase.name);

            vars.insert(phase.name.clone(), Value::String(output.clone()));
            last = Some(output);
        }

        match (&self.report_template, last) {
            (Some(report), _) => Ok(template::render(report, &vars)?),
            (None, Some(output)) => Ok(output),
            (None, None) => anyhow::bail!("{} has no phases to run", self.config.name),
        }
    }
}

impl ExecutableUnit for MultiStepAgent {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn execute(&self, instruction: &str, context: &Context) -> anyhow::Result<String> {
        let mut state = state::lock(&self.state);
        state.begin(instruction, context);

        match self.run_phases(instruction, context, &mut state) {
            Ok(result) => {
                state.complete(result.as_str());
                info!("{} completed {} phases", self.config.name, self.phases.len());
                Ok(result)
            }
            Err(e) => {
                error!("{} failed: {}", self.config.name, e);
                state.fail(e.to_string());
                Err(e)
            }
        }
    }
}

impl fmt::Display for MultiStepAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.config.name, state::lock(&self.state).status)
    }
}

impl fmt::Debug for MultiStepAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiStepAgent")
            .field("config", &self.config)
            .field("phases", &self.phases)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
