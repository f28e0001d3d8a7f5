//! Single-call agent.

use std::fmt;
use std::sync::Mutex;

use tracing::{error, info};

use crate::context::{self, Context};
use crate::unit::ExecutableUnit;

use super::config::{AgentConfig, AgentRole};
use super::llm::{GenerationOptions, SharedGenerator};
use super::state::{self, AgentState, MessageRole, StateSummary};

/// Build the prompt for a task: the task text followed by a `Context:`
/// block listing every context entry.
pub fn prepare_prompt(task: &str, context: &Context) -> String {
    let mut prompt = task.to_string();
    if !context.is_empty() {
        prompt.push_str("\n\nContext:\n");
        for (key, value) in context {
            prompt.push_str(&format!("- {}: {}\n", key, context::value_text(value)));
        }
    }
    prompt
}

/// Agent that answers a task with one generation call.
pub struct SimpleAgent {
    config: AgentConfig,
    generator: SharedGenerator,
    state: Mutex<AgentState>,
}

impl SimpleAgent {
    pub fn new(config: AgentConfig, generator: SharedGenerator) -> Self {
        Self {
            config,
            generator,
            state: Mutex::new(AgentState::default()),
        }
    }

    /// Agent preconfigured for a specialist role.
    pub fn from_role(role: AgentRole, generator: SharedGenerator) -> Self {
        Self::new(role.config(), generator)
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AgentState {
        state::lock(&self.state).clone()
    }

    pub fn summary(&self) -> StateSummary {
        state::lock(&self.state).summary(&self.config.name)
    }

    pub fn reset(&self) {
        state::lock(&self.state).reset();
    }
}

impl ExecutableUnit for SimpleAgent {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn execute(&self, instruction: &str, context: &Context) -> anyhow::Result<String> {
        let mut state = state::lock(&self.state);
        let max = self.config.max_memory_messages;
        state.begin(instruction, context);

        let prompt = prepare_prompt(instruction, context);
        state.add_message(MessageRole::System, self.config.system_message.as_str(), max);
        state.add_message(MessageRole::User, prompt.as_str(), max);

        let options = GenerationOptions::with_temperature(self.config.temperature);
        match self
            .generator
            .generate(&prompt, &self.config.system_message, &options)
        {
            Ok(response) => {
                state.add_message(MessageRole::Assistant, response.as_str(), max);
                state.complete(response.as_str());
                info!("{} completed task", self.config.name);
                Ok(response)
            }
            Err(e) => {
                error!("{} failed: {}", self.config.name, e);
                state.fail(e.to_string());
                Err(e)
            }
        }
    }
}

impl fmt::Display for SimpleAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.config.name, state::lock(&self.state).status)
    }
}

impl fmt::Debug for SimpleAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleAgent")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
