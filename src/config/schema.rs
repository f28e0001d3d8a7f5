//! Workflow file schema.
//!
//! These structs map one-to-one onto the YAML workflow format:
//!
//! ```yaml
//! name: vendor-review
//! settings:
//!   max_retries: 1
//! context:
//!   vendor: Acme Corp
//! agents:
//!   researcher:
//!     role: research
//!   drafter:
//!     kind: policy_drafting
//! steps:
//!   - name: research
//!     agent: researcher
//!     task: "Research {vendor}"
//!   - name: draft
//!     agent: drafter
//!     task: "Vendor policy for {vendor}: {research}"
//!     depends_on: [research]
//!     when:
//!       key: needs_policy
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agents::{AgentConfig, AgentRole};
use crate::context::{self, Context};
use crate::runner::{RunOptions, DEFAULT_MAX_RETRIES};
use crate::steps::Condition;

/// Root of a workflow file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowFile {
    /// Workflow name; the orchestrator default is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub settings: Settings,

    /// Initial context for runs.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: Context,

    /// Agent definitions, keyed by the name steps refer to.
    pub agents: BTreeMap<String, AgentSpec>,

    /// Steps in declaration order.
    pub steps: Vec<StepSpec>,
}

impl WorkflowFile {
    /// Run options carrying this file's context and retry setting.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            context: self.context.clone(),
            max_retries: self.settings.max_retries,
        }
    }

    pub fn step(&self, name: &str) -> Option<&StepSpec> {
        self.steps.iter().find(|s| s.name == name)
    }
}

/// Settings applied to every run of the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Extra attempts per step after a failure.
    pub max_retries: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Which agent implementation to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    #[default]
    Simple,
    PolicyDrafting,
    RiskAssessment,
}

/// Agent definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSpec {
    pub kind: AgentKind,

    /// Role preset for simple agents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<AgentRole>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl AgentSpec {
    /// Apply the explicit overrides in this spec to `config`.
    pub fn apply(&self, mut config: AgentConfig) -> AgentConfig {
        if let Some(name) = &self.name {
            config.name = name.clone();
        }
        if let Some(description) = &self.description {
            config.description = description.clone();
        }
        if let Some(system_message) = &self.system_message {
            config.system_message = system_message.clone();
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }
        config
    }

    /// Configuration for a simple agent defined under `key`.
    pub fn simple_config(&self, key: &str) -> AgentConfig {
        let base = match self.role {
            Some(role) => role.config(),
            None => AgentConfig::new(key, ""),
        };
        self.apply(base)
    }
}

/// Step definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSpec {
    pub name: String,

    /// Key into the workflow's `agents`.
    pub agent: String,

    /// Task template.
    pub task: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<ConditionSpec>,
}

/// Declarative step condition.
///
/// With `equals`, the step runs iff the context value equals it. Without,
/// the step runs iff the value is present and truthy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSpec {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<Value>,
}

impl ConditionSpec {
    pub fn evaluate(&self, context: &Context) -> bool {
        match (context.get(&self.key), &self.equals) {
            (Some(value), Some(expected)) => value == expected,
            (Some(value), None) => context::is_truthy(value),
            (None, _) => false,
        }
    }

    pub fn to_condition(&self) -> Condition {
        let spec = self.clone();
        std::sync::Arc::new(move |ctx: &Context| spec.evaluate(ctx))
    }
}
