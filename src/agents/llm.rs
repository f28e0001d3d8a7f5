//! Text generation boundary.
//!
//! Agents never talk to a model provider directly; they go through a
//! [`TextGenerator`]. Provider clients live outside this crate.

use std::sync::Arc;

/// Sampling options for one generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

impl GenerationOptions {
    /// Options with the given temperature and no token limit.
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature,
            ..Default::default()
        }
    }
}

/// Produces text for a prompt.
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt` under `system_message`.
    fn generate(
        &self,
        prompt: &str,
        system_message: &str,
        options: &GenerationOptions,
    ) -> anyhow::Result<String>;
}

/// A generator shared between agents.
pub type SharedGenerator = Arc<dyn TextGenerator>;

/// Returns the prompt unchanged, optionally prefixed.
///
/// Used for dry runs, where the shape of the data flow matters and the
/// content does not.
#[derive(Debug, Default, Clone)]
pub struct EchoGenerator {
    prefix: Option<String>,
}

impl EchoGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every response with `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

impl TextGenerator for EchoGenerator {
    fn generate(
        &self,
        prompt: &str,
        _system_message: &str,
        _options: &GenerationOptions,
    ) -> anyhow::Result<String> {
        Ok(match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, prompt),
            None => prompt.to_string(),
        })
    }
}
