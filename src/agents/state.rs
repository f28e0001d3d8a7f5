//! Per-agent conversational state.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::context::Context;

/// Author of a history message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// One entry in an agent's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Lifecycle of an agent's current task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    #[default]
    Idle,
    InProgress,
    Completed,
    Failed,
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgentStatus::Idle => "idle",
            AgentStatus::InProgress => "in_progress",
            AgentStatus::Completed => "completed",
            AgentStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Mutable state an agent carries between calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgentState {
    pub messages: Vec<Message>,
    pub current_task: String,
    /// Accumulated context from every task so far.
    pub context: Context,
    /// Number of completed tasks.
    pub iteration_count: u32,
    pub status: AgentStatus,
    /// Last result, or the last error text when `status` is failed.
    pub result: Option<String>,
}

impl AgentState {
    /// Mark a new task as in progress and absorb its context.
    pub fn begin(&mut self, task: &str, context: &Context) {
        if !task.is_empty() {
            self.current_task = task.to_string();
        }
        self.context
            .extend(context.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.status = AgentStatus::InProgress;
    }

    /// Append a message, trimming to the `max` most recent.
    ///
    /// System messages that fall outside the window are kept ahead of it.
    pub fn add_message(&mut self, role: MessageRole, content: impl Into<String>, max: usize) {
        self.messages.push(Message {
            role,
            content: content.into(),
        });

        if self.messages.len() > max {
            let cut = self.messages.len() - max;
            let recent = self.messages.split_off(cut);
            self.messages.retain(|m| m.role == MessageRole::System);
            self.messages.extend(recent);
        }
    }

    pub fn complete(&mut self, result: impl Into<String>) {
        self.status = AgentStatus::Completed;
        self.result = Some(result.into());
        self.iteration_count += 1;
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = AgentStatus::Failed;
        self.result = Some(error.into());
    }

    /// Back to a fresh idle state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn summary(&self, name: &str) -> StateSummary {
        StateSummary {
            name: name.to_string(),
            status: self.status,
            current_task: self.current_task.clone(),
            iteration_count: self.iteration_count,
            message_count: self.messages.len(),
            has_result: self.result.is_some(),
        }
    }
}

/// Compact view of an agent's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSummary {
    pub name: String,
    pub status: AgentStatus,
    pub current_task: String,
    pub iteration_count: u32,
    pub message_count: usize,
    pub has_result: bool,
}

/// Lock agent state, recovering from a poisoned lock.
pub(crate) fn lock(state: &Mutex<AgentState>) -> MutexGuard<'_, AgentState> {
    state
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
