//! Styled terminal UI.

use console::Term;
use std::io::Write;

use super::{preview, should_use_colors, FlowTheme, OutputMode, UserInterface};

/// Characters of step output shown in normal mode.
const PREVIEW_WIDTH: usize = 72;

/// Terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: FlowTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, colors: bool) -> Self {
        let theme = if colors {
            FlowTheme::new()
        } else {
            FlowTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn step_succeeded(&mut self, step: &str, output: &str) {
        if !self.mode.shows_status() {
            return;
        }
        if self.mode.shows_full_output() {
            writeln!(self.term, "{}", self.theme.format_success(step)).ok();
            for line in output.lines() {
                writeln!(self.term, "    {}", self.theme.dim.apply_to(line)).ok();
            }
        } else {
            writeln!(
                self.term,
                "{} {}",
                self.theme.format_success(step),
                self.theme.dim.apply_to(preview(output, PREVIEW_WIDTH))
            )
            .ok();
        }
    }

    fn step_failed(&mut self, step: &str, error: &str) {
        writeln!(
            self.term,
            "{}",
            self.theme.format_error(&format!("{}: {}", step, error))
        )
        .ok();
    }

    fn step_skipped(&mut self, step: &str) {
        if self.mode.shows_status() {
            writeln!(
                self.term,
                "{}",
                self.theme.format_skipped(&format!("{} (condition not met)", step))
            )
            .ok();
        }
    }

    fn raw(&mut self, text: &str) {
        writeln!(self.term, "{}", text).ok();
    }
}

/// Create the terminal UI for the given mode.
pub fn create_ui(mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode, should_use_colors(no_color)))
}
