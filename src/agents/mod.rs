//! Agents: executable units backed by a text generator.
//!
//! - [`SimpleAgent`] - One generation call per task
//! - [`MultiStepAgent`] - Ordered phases feeding each other
//! - [`AgentRole`] - Specialist presets (research, analysis, generation, review)
//! - [`TextGenerator`] - The boundary to a model provider

pub mod config;
pub mod llm;
pub mod multi_step;
pub mod simple;
pub mod state;

pub use config::{AgentConfig, AgentRole};
pub use llm::{EchoGenerator, GenerationOptions, SharedGenerator, TextGenerator};
pub use multi_step::{MultiStepAgent, Phase};
pub use simple::{prepare_prompt, SimpleAgent};
pub use state::{AgentState, AgentStatus, Message, MessageRole, StateSummary};
