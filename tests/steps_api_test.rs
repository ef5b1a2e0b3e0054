//! Integration tests for the steps public API.

use runbook::state::State;
use runbook::steps::{
    execute_step, should_run, Conditional, Dynamic, PromptInstructions, ScriptInstructions, Step,
    StepKind, StepStatus,
};
use runbook::ui::{MockUI, UserInterface};
use std::sync::Arc;

#[test]
fn public_api_accessible() {
    let _status = StepStatus::Completed;
    let _kind = StepKind::Unknown;
    let _cond: Conditional = true.into();
    let _name: Dynamic<String> = "name".into();
}

#[test]
fn conditionals_default_to_true() {
    let state = State::new();
    assert!(should_run(&Conditional::default(), &state));
    assert!(!should_run(&Conditional::literal(false), &state));
}

#[tokio::test]
async fn silent_prompt_is_masked_and_stored() {
    let mock = Arc::new(MockUI::new());
    let ui: Arc<dyn UserInterface> = mock.clone();
    mock.queue_response("s3cret");

    let step = Step::prompt(
        "root password",
        PromptInstructions::new("enter a root password:")
            .silent(true)
            .on_response(|ctx| {
                ctx.state.set("root_password", ctx.response);
                Ok(())
            }),
    );
    let state = State::new();
    let result = execute_step(&step, "root password", &state, &ui).await.unwrap();

    assert_eq!(result.status, StepStatus::Completed);
    assert!(mock.prompts_shown()[0].silent);
    assert_eq!(state.get_str("root_password").as_deref(), Some("s3cret"));
}

#[tokio::test]
async fn on_ready_runs_before_the_question() {
    let mock = Arc::new(MockUI::new());
    let ui: Arc<dyn UserInterface> = mock.clone();
    mock.queue_response("/dev/sda");

    let step = Step::prompt(
        "pick disk",
        PromptInstructions::new(Dynamic::computed(|s: &State| {
            format!("choose one of {}:", s.render("disks").unwrap_or_default())
        }))
        .on_ready_async(|state| async move {
            state.set("disks", "/dev/sda /dev/sdb");
            Ok(())
        }),
    );
    execute_step(&step, "pick disk", &State::new(), &ui)
        .await
        .unwrap();

    assert_eq!(
        mock.prompts_shown()[0].query,
        "choose one of /dev/sda /dev/sdb:"
    );
}

#[tokio::test]
async fn async_script_is_awaited() {
    let mock = Arc::new(MockUI::new());
    let ui: Arc<dyn UserInterface> = mock.clone();
    let step = Step::script(
        "write config",
        ScriptInstructions::new_async(|state| async move {
            tokio::task::yield_now().await;
            state.set("written", true);
            Ok(())
        }),
    );
    let state = State::new();
    execute_step(&step, "write config", &state, &ui).await.unwrap();
    assert_eq!(state.get_bool("written"), Some(true));
}
