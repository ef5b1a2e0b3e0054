//! List command implementation.
//!
//! The `runbook list` command prints the steps of a step file.

use std::sync::Arc;

use crate::cli::args::ListArgs;
use crate::config::{load_step_file, validate, StepConfig};
use crate::error::{Result, RunbookError};
use crate::ui::theme::RunbookTheme;
use crate::ui::{should_use_colors, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

/// One line of the listing: position, kind, name template and condition.
pub fn describe_step(position: usize, step: &StepConfig) -> String {
    let mut line = format!("{:>3}. [{}] {}", position, step.kind, step.name);
    if step.when.is_some() {
        line.push_str(" (conditional)");
    }
    line
}

impl Command for ListCommand {
    fn execute(&self, ui: &Arc<dyn UserInterface>) -> Result<CommandResult> {
        let file = match load_step_file(&self.args.file) {
            Ok(file) => file,
            Err(RunbookError::ConfigNotFound { path }) => {
                ui.error(&format!("Step file not found: {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };
        validate(&file)?;

        let theme = if should_use_colors() {
            RunbookTheme::new()
        } else {
            RunbookTheme::plain()
        };

        if let Some(name) = &file.name {
            ui.show_header(name);
        }
        ui.message(&format!("  {}", theme.highlight.apply_to("Steps:")));
        for (index, step) in file.steps.iter().enumerate() {
            ui.message(&format!("  {}", describe_step(index + 1, step)));
        }

        Ok(CommandResult::success())
    }
}
