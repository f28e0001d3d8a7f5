//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.

use super::{OutputMode, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    succeeded_steps: Vec<(String, String)>,
    failed_steps: Vec<(String, String)>,
    skipped_steps: Vec<String>,
    raw: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// `(step, output)` pairs reported as succeeded.
    pub fn succeeded_steps(&self) -> &[(String, String)] {
        &self.succeeded_steps
    }

    /// `(step, error)` pairs reported as failed.
    pub fn failed_steps(&self) -> &[(String, String)] {
        &self.failed_steps
    }

    pub fn skipped_steps(&self) -> &[String] {
        &self.skipped_steps
    }

    /// Text written through [`UserInterface::raw`].
    pub fn raw_output(&self) -> &[String] {
        &self.raw
    }

    /// Check whether any captured message, success, warning, or error
    /// contains `needle`.
    pub fn has_text(&self, needle: &str) -> bool {
        self.messages
            .iter()
            .chain(&self.successes)
            .chain(&self.warnings)
            .chain(&self.errors)
            .chain(&self.raw)
            .any(|m| m.contains(needle))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn step_succeeded(&mut self, step: &str, output: &str) {
        self.succeeded_steps
            .push((step.to_string(), output.to_string()));
    }

    fn step_failed(&mut self, step: &str, error: &str) {
        self.failed_steps.push((step.to_string(), error.to_string()));
    }

    fn step_skipped(&mut self, step: &str) {
        self.skipped_steps.push(step.to_string());
    }

    fn raw(&mut self, text: &str) {
        self.raw.push(text.to_string());
    }
}
