//! Run command implementation.
//!
//! The `runbook run` command loads a step file and executes it.

use std::sync::Arc;
use tracing::debug;

use crate::cli::args::RunArgs;
use crate::config::{compile, load_step_file};
use crate::error::{Result, RunbookError};
use crate::runner::Runner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(args: RunArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &Arc<dyn UserInterface>) -> Result<CommandResult> {
        let file = match load_step_file(&self.args.file) {
            Ok(file) => file,
            Err(RunbookError::ConfigNotFound { path }) => {
                ui.error(&format!("Step file not found: {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let steps = compile(&file, ui)?;
        if let Some(name) = &file.name {
            ui.show_header(name);
        }
        if steps.is_empty() {
            ui.warning(&format!("{} has no steps", self.args.file.display()));
        }

        let runtime = tokio::runtime::Runtime::new()?;
        let runner = Runner::new(Arc::clone(ui));

        match runtime.block_on(runner.run(&steps)) {
            Ok(report) => {
                for result in &report.results {
                    debug!("{}", result.summary_line());
                }
                Ok(CommandResult::success())
            }
            // Already reported by the runner.
            Err(RunbookError::StepFailed { .. }) => Ok(CommandResult::failure(1)),
            Err(e) => Err(e),
        }
    }
}
