//! Interactive terminal UI.

use console::Term;
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;

use super::progress::{format_duration, format_progress};
use super::{
    read_response, should_use_colors, NonInteractiveUI, OutputMode, Prompt, RunbookTheme,
    UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: RunbookTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            RunbookTheme::new()
        } else {
            RunbookTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }

    fn line(&self, text: &str) {
        self.term.write_line(text).ok();
    }
}

impl UserInterface for TerminalUI {
    fn message(&self, msg: &str) {
        if self.mode.shows_status() {
            self.line(msg);
        }
    }

    fn success(&self, msg: &str) {
        if self.mode.shows_status() {
            self.line(&self.theme.format_success(msg));
        }
    }

    fn warning(&self, msg: &str) {
        if self.mode.shows_status() {
            self.line(&self.theme.format_warning(msg));
        }
    }

    fn error(&self, msg: &str) {
        self.line(&self.theme.format_error(msg));
    }

    fn show_header(&self, title: &str) {
        if self.mode.shows_status() {
            self.line(&format!("\n{}\n", self.theme.format_header(title)));
        }
    }

    fn show_progress(&self, percent: f64, name: &str) {
        if !self.mode.shows_status() {
            return;
        }
        if let Some(line) = format_progress(percent, name) {
            self.line(&self.theme.format_progress(&line));
        }
    }

    fn show_completion(&self, steps: usize, elapsed: Duration) {
        if self.mode.shows_status() {
            let label = if steps == 1 { "step" } else { "steps" };
            self.line(&self.theme.format_success(&format!(
                "Completed {} {} in {}",
                steps,
                label,
                format_duration(elapsed)
            )));
        }
    }

    fn prompt(&self, prompt: &Prompt) -> Result<String> {
        read_response(prompt, &self.term)
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the appropriate UI based on context.
///
/// The terminal UI needs both a terminal on stdout for rendering and on stdin
/// for key-by-key input; anything else reads plain lines.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Arc<dyn UserInterface> {
    if interactive && Term::stdout().is_term() && std::io::stdin().is_terminal() {
        Arc::new(TerminalUI::new(mode))
    } else {
        Arc::new(NonInteractiveUI::new(mode))
    }
}
