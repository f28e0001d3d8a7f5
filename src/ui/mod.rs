//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for styled terminal output
//! - [`MockUI`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use grc_flow::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_header("vendor-review");
//! ui.step_succeeded("research", "Findings");
//!
//! assert_eq!(ui.headers(), ["vendor-review"]);
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, FlowTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Report a step that produced a result.
    fn step_succeeded(&mut self, step: &str, output: &str);

    /// Report a step that recorded an error.
    fn step_failed(&mut self, step: &str, error: &str);

    /// Report a step whose condition kept it from running.
    fn step_skipped(&mut self, step: &str);

    /// Write machine-readable or preformatted text verbatim, in every mode.
    fn raw(&mut self, text: &str);
}

/// First line of `text`, shortened to `max` characters.
pub fn preview(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() > max {
        let cut: String = line.chars().take(max).collect();
        format!("{}…", cut)
    } else if text.lines().nth(1).is_some() {
        format!("{}…", line)
    } else {
        line.to_string()
    }
}
