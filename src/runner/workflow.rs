//! Sequential step runner.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error};

use crate::error::Result;
use crate::state::State;
use crate::steps::{execute_step, Step, StepResult, StepStatus};
use crate::ui::{create_ui, progress_percent, OutputMode, UserInterface};

/// Runs a step sequence against one fresh state.
pub struct Runner {
    ui: Arc<dyn UserInterface>,
}

/// Result of a run that reached its last step.
#[derive(Debug)]
pub struct RunReport {
    /// One result per step, in order.
    pub results: Vec<StepResult>,
    /// State as left by the last step.
    pub state: State,
    /// Total duration.
    pub duration: Duration,
}

impl RunReport {
    /// Number of steps whose executor ran.
    pub fn completed_count(&self) -> usize {
        self.count(StepStatus::Completed)
    }

    /// Number of steps skipped by their conditional.
    pub fn skipped_count(&self) -> usize {
        self.count(StepStatus::Skipped)
    }

    /// Result for the step with the given resolved name.
    pub fn result(&self, name: &str) -> Option<&StepResult> {
        self.results.iter().find(|r| r.name == name)
    }

    fn count(&self, status: StepStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

impl Runner {
    /// Create a runner reporting through `ui`.
    pub fn new(ui: Arc<dyn UserInterface>) -> Self {
        Self { ui }
    }

    /// The interface steps prompt and report through.
    pub fn ui(&self) -> &Arc<dyn UserInterface> {
        &self.ui
    }

    /// Execute `steps` in order, awaiting each before the next.
    ///
    /// The first executor error stops the run and is returned as
    /// [`crate::RunbookError::StepFailed`] naming the step.
    pub async fn run(&self, steps: &[Step]) -> Result<RunReport> {
        self.run_with_state(steps, State::new()).await
    }

    /// Like [`Runner::run`] but starting from an existing state.
    pub async fn run_with_state(&self, steps: &[Step], state: State) -> Result<RunReport> {
        let start = Instant::now();
        let total = steps.len();
        let mut results = Vec::with_capacity(total);

        for (index, step) in steps.iter().enumerate() {
            let percent = progress_percent(index, total);
            let name = step.name.resolve(&state);
            self.ui.show_progress(percent, &name);
            debug!("Running step {}/{} '{}' ({})", index + 1, total, name, step.kind());

            match execute_step(step, &name, &state, &self.ui).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    error!("Step '{}' failed: {}", name, e);
                    self.ui.error(&format!("Step '{}' failed: {}", name, e));
                    return Err(e.in_step(&name));
                }
            }
        }

        let duration = start.elapsed();
        self.ui.show_completion(total, duration);

        Ok(RunReport {
            results,
            state,
            duration,
        })
    }
}

/// Run `steps` with a terminal interface chosen for the current process.
pub async fn run(steps: &[Step]) -> Result<RunReport> {
    Runner::new(create_ui(true, OutputMode::Normal)).run(steps).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RunbookError;
    use crate::steps::{Dynamic, ScriptInstructions};
    use crate::ui::MockUI;

    fn runner() -> (Arc<MockUI>, Runner) {
        let mock = Arc::new(MockUI::new());
        let ui: Arc<dyn UserInterface> = mock.clone();
        (mock, Runner::new(ui))
    }

    fn noop(name: &str) -> Step {
        Step::script(name, ScriptInstructions::new(|_| Ok(())))
    }

    #[tokio::test]
    async fn empty_run_reports_completion() {
        let (mock, runner) = runner();
        let report = runner.run(&[]).await.unwrap();
        assert!(report.results.is_empty());
        assert!(mock.progress().is_empty());
        assert_eq!(mock.completions(), vec![0]);
    }

    #[tokio::test]
    async fn reports_one_result_per_step() {
        let (_, runner) = runner();
        let steps = vec![noop("a"), noop("b").when(false), noop("c")];
        let report = runner.run(&steps).await.unwrap();
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.completed_count(), 2);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.result("b").unwrap().status, StepStatus::Skipped);
    }

    #[tokio::test]
    async fn names_resolve_against_current_state() {
        let (mock, runner) = runner();
        let steps = vec![
            Step::script(
                "pick",
                ScriptInstructions::new(|s| {
                    s.set("disk", "/dev/sda");
                    Ok(())
                }),
            ),
            Step::script(
                Dynamic::computed(|s: &State| {
                    format!("partition {}", s.render("disk").unwrap_or_default())
                }),
                ScriptInstructions::new(|_| Ok(())),
            ),
        ];
        runner.run(&steps).await.unwrap();
        assert_eq!(mock.progress()[1], (50, "partition /dev/sda".to_string()));
    }

    #[tokio::test]
    async fn failure_is_wrapped_and_reported() {
        let (mock, runner) = runner();
        let steps = vec![
            Step::script("boom", ScriptInstructions::new(|_| anyhow::bail!("no disk"))),
            noop("after"),
        ];
        let err = runner.run(&steps).await.unwrap_err();
        assert!(matches!(err, RunbookError::StepFailed { .. }));
        assert_eq!(err.step_name(), Some("boom"));
        assert!(mock.has_error("boom"));
        assert!(mock.completions().is_empty());
        assert_eq!(mock.progress().len(), 1);
    }

    #[tokio::test]
    async fn run_with_state_keeps_seeded_values() {
        let (_, runner) = runner();
        let state = State::new();
        state.set("user", "root");
        let report = runner.run_with_state(&[noop("a")], state).await.unwrap();
        assert_eq!(report.state.get_str("user").as_deref(), Some("root"));
    }
}
