//! Agent configuration and role presets.

use serde::{Deserialize, Serialize};

/// Default sampling temperature for agents without a role preset.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default number of history messages an agent keeps.
pub const DEFAULT_MAX_MEMORY_MESSAGES: usize = 10;

/// Configuration shared by all agent kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentConfig {
    /// Display name, also used as the unit name in visualizations.
    pub name: String,
    pub description: String,
    /// System message sent with every generation call.
    pub system_message: String,
    pub temperature: f32,
    /// History limit; system messages survive trimming.
    pub max_memory_messages: usize,
}

impl AgentConfig {
    pub fn new(name: impl Into<String>, system_message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            system_message: system_message.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_memory_messages: DEFAULT_MAX_MEMORY_MESSAGES,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_memory_messages(mut self, max: usize) -> Self {
        self.max_memory_messages = max;
        self
    }
}

/// Specialist roles with preset prompts and temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    /// Information gathering.
    Research,
    /// Risk, gap, and compliance analysis.
    Analysis,
    /// Document drafting.
    Generation,
    /// Quality review.
    Review,
}

impl AgentRole {
    pub const ALL: [AgentRole; 4] = [
        AgentRole::Research,
        AgentRole::Analysis,
        AgentRole::Generation,
        AgentRole::Review,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            AgentRole::Research => "Research Agent",
            AgentRole::Analysis => "Analysis Agent",
            AgentRole::Generation => "Generation Agent",
            AgentRole::Review => "Review Agent",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AgentRole::Research => {
                "Gathers information and researches topics from provided context"
            }
            AgentRole::Analysis => "Analyzes information to identify patterns, risks, and gaps",
            AgentRole::Generation => "Generates professional GRC content and documentation",
            AgentRole::Review => "Reviews content for quality, completeness, and compliance",
        }
    }

    /// Lower for factual work, higher for drafting.
    pub fn temperature(self) -> f32 {
        match self {
            AgentRole::Research => 0.3,
            AgentRole::Analysis => 0.5,
            AgentRole::Generation => 0.7,
            AgentRole::Review => 0.4,
        }
    }

    pub fn system_message(self) -> &'static str {
        match self {
            AgentRole::Research => {
                "You are a research specialist. Your role is to:\n\
                 1. Search through provided documents and context\n\
                 2. Extract relevant information\n\
                 3. Summarize findings clearly\n\
                 4. Cite sources when available\n\
                 \n\
                 Be thorough, accurate, and concise in your research."
            }
            AgentRole::Analysis => {
                "You are an analytical expert specializing in GRC (Governance, Risk, and Compliance). Your role is to:\n\
                 1. Analyze provided information critically\n\
                 2. Identify patterns, trends, and anomalies\n\
                 3. Assess risks and compliance gaps\n\
                 4. Provide evidence-based insights\n\
                 5. Rate findings by severity/priority\n\
                 \n\
                 Use structured thinking and provide clear, actionable analysis."
            }
            AgentRole::Generation => {
                "You are a professional GRC content writer. Your role is to:\n\
                 1. Create clear, well-structured documents\n\
                 2. Follow industry standards and best practices\n\
                 3. Use appropriate professional tone\n\
                 4. Include all required sections\n\
                 5. Ensure accuracy and compliance\n\
                 \n\
                 Write in clear, professional language suitable for business audiences."
            }
            AgentRole::Review => {
                "You are a quality assurance expert for GRC documentation. Your role is to:\n\
                 1. Review documents for completeness and accuracy\n\
                 2. Check compliance with frameworks and standards\n\
                 3. Identify gaps and missing elements\n\
                 4. Suggest specific improvements\n\
                 5. Verify professional tone and clarity\n\
                 \n\
                 Provide constructive, detailed feedback with specific examples."
            }
        }
    }

    /// Full configuration for this role.
    pub fn config(self) -> AgentConfig {
        AgentConfig::new(self.display_name(), self.system_message())
            .with_description(self.description())
            .with_temperature(self.temperature())
    }
}
