//! Per-step dispatch.
//!
//! Applies the conditional gate and hands the step to the executor for its
//! kind, reporting what happened as a [`StepResult`].

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::Result;
use crate::shell::execute_shell;
use crate::state::State;
use crate::ui::{format_duration, UserInterface};

use super::prompt::execute_prompt;
use super::script::execute_script;
use super::step::{Instructions, Step, StepKind};
use super::value::should_run;

/// Outcome of a step that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The executor ran to completion (or the kind is a no-op).
    Completed,

    /// The conditional was false.
    Skipped,
}

impl StepStatus {
    /// Get a display character for this status.
    pub fn display_char(&self) -> char {
        match self {
            StepStatus::Completed => '✓',
            StepStatus::Skipped => '⊘',
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StepStatus::Completed => "completed",
            StepStatus::Skipped => "skipped",
        };
        write!(f, "{}", s)
    }
}

/// Result of executing a step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Resolved step name.
    pub name: String,

    /// Executor kind.
    pub kind: StepKind,

    /// What happened.
    pub status: StepStatus,

    /// Execution duration.
    pub duration: Duration,

    /// Exit code of the process, for shell steps that ran.
    pub exit_code: Option<i32>,
}

impl StepResult {
    /// Create a completed result.
    pub fn completed(name: &str, kind: StepKind, duration: Duration, exit_code: Option<i32>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            status: StepStatus::Completed,
            duration,
            exit_code,
        }
    }

    /// Create a skipped result.
    pub fn skipped(name: &str, kind: StepKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            status: StepStatus::Skipped,
            duration: Duration::ZERO,
            exit_code: None,
        }
    }

    /// Generate a summary line for display.
    pub fn summary_line(&self) -> String {
        let icon = self.status.display_char();
        match (self.status, self.exit_code) {
            (StepStatus::Skipped, _) => format!("{} {} (skipped)", icon, self.name),
            (StepStatus::Completed, Some(code)) if code != 0 => format!(
                "{} {} ({}, exit code {})",
                icon,
                self.name,
                format_duration(self.duration),
                code
            ),
            (StepStatus::Completed, _) => {
                format!("{} {} ({})", icon, self.name, format_duration(self.duration))
            }
        }
    }
}

/// Execute a single step whose name has already been resolved.
///
/// Unknown kinds complete immediately without evaluating the conditional.
pub async fn execute_step(
    step: &Step,
    name: &str,
    state: &State,
    ui: &Arc<dyn UserInterface>,
) -> Result<StepResult> {
    let kind = step.kind();

    if let Instructions::Unknown(unknown) = &step.instructions {
        debug!("Step '{}' has unknown kind '{}', nothing to do", name, unknown);
        return Ok(StepResult::completed(name, kind, Duration::ZERO, None));
    }

    if !should_run(&step.conditional, state) {
        debug!("Skipping '{}': conditional is false", name);
        return Ok(StepResult::skipped(name, kind));
    }

    let start = Instant::now();
    let exit_code = match &step.instructions {
        Instructions::Shell(shell) => execute_shell(shell, state).await?.exit_code,
        Instructions::Script(script) => {
            execute_script(script, state).await?;
            None
        }
        Instructions::Prompt(prompt) => {
            execute_prompt(name, prompt, state, ui).await?;
            None
        }
        Instructions::Unknown(_) => None,
    };

    Ok(StepResult::completed(name, kind, start.elapsed(), exit_code))
}
