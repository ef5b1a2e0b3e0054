//! Operator-facing terminal interaction.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for piped or headless input
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use runbook::ui::{create_ui, OutputMode, UserInterface};
//!
//! let ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Arch install");
//! ui.success("Setup complete!");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod prompts;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::{format_duration, format_progress, progress_percent};
pub use prompts::read_response;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, RunbookTheme};

use std::time::Duration;

use crate::error::Result;

/// Trait for user interface interactions.
///
/// Implementations are shared between the runner and the blocking task that
/// reads prompt input, so every method takes `&self`.
pub trait UserInterface: Send + Sync {
    /// Display a message to the user.
    fn message(&self, msg: &str);

    /// Display a success message.
    fn success(&self, msg: &str);

    /// Display a warning message.
    fn warning(&self, msg: &str);

    /// Display an error message. Shown in every output mode.
    fn error(&self, msg: &str);

    /// Show a header/banner.
    fn show_header(&self, title: &str);

    /// Announce a step as `[percent%] name`.
    fn show_progress(&self, percent: f64, name: &str);

    /// Announce the end of a run.
    fn show_completion(&self, steps: usize, elapsed: Duration);

    /// Read one response from the operator. Blocks until submitted.
    ///
    /// Returns the raw input; applying the default on empty input is left to
    /// the caller.
    fn prompt(&self, prompt: &Prompt) -> Result<String>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// A question for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Name of the step asking.
    pub key: String,
    /// The question to display.
    pub query: String,
    /// Value used when the operator submits nothing.
    pub default: Option<String>,
    /// Echo `*` instead of the typed characters.
    pub silent: bool,
}

impl Prompt {
    /// Create a visible prompt without a default.
    pub fn new(key: &str, query: &str) -> Self {
        Self {
            key: key.to_string(),
            query: query.to_string(),
            default: None,
            silent: false,
        }
    }
}
