//! Turning a parsed step file into runnable steps.
//!
//! String fields become [`Dynamic`] values that interpolate `${key}` against
//! state when the step is reached; plain strings stay literal.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

use crate::config::interpolation::{has_interpolation, interpolate};
use crate::config::schema::{Condition, HandlerConfig, ResponseFormat, StepConfig, StepFile};
use crate::config::validator::validate;
use crate::error::Result;
use crate::shell::{OutputHandler, ShellInstructions};
use crate::state::State;
use crate::steps::{
    is_affirmative, Conditional, Dynamic, PromptInstructions, ScriptInstructions, Step,
};
use crate::ui::UserInterface;

/// Validate `file` and build its steps.
///
/// `ui` receives chunks from handlers that set `echo`.
pub fn compile(file: &StepFile, ui: &Arc<dyn UserInterface>) -> Result<Vec<Step>> {
    validate(file)?;
    file.steps.iter().map(|step| compile_step(step, ui)).collect()
}

/// Build a single step. Assumes the step passed validation.
pub fn compile_step(config: &StepConfig, ui: &Arc<dyn UserInterface>) -> Result<Step> {
    let name = template(&config.name);

    let step = match config.kind.as_str() {
        "shell" => Step::shell(name, shell_instructions(config, ui)?),
        "script" => Step::script(name, script_instructions(config)),
        "prompt" => Step::prompt(name, prompt_instructions(config)),
        other => Step::unknown(name, other),
    };

    Ok(match &config.when {
        Some(condition) => step.when(conditional(condition)),
        None => step,
    })
}

/// A string field, interpolated at execution time when it references state.
pub fn template(text: &str) -> Dynamic<String> {
    if has_interpolation(text) {
        let text = text.to_string();
        Dynamic::computed(move |state| interpolate(&text, state, &[]))
    } else {
        Dynamic::literal(text.to_string())
    }
}

/// Evaluate a step file condition.
pub fn conditional(condition: &Condition) -> Conditional {
    match condition {
        Condition::Literal(value) => Conditional::literal(*value),
        Condition::Key { key, equals, not } => {
            let (key, equals, not) = (key.clone(), equals.clone(), *not);
            Conditional::computed(move |state| (state.get(&key).as_ref() == Some(&equals)) != not)
        }
    }
}

fn shell_instructions(
    config: &StepConfig,
    ui: &Arc<dyn UserInterface>,
) -> Result<ShellInstructions> {
    let mut instructions = match (&config.command, &config.run) {
        (Some(command), _) => {
            ShellInstructions::new(template(command)).args(config.args.iter().map(|a| template(a)))
        }
        (None, Some(script)) => ShellInstructions::sh(template(script)),
        (None, None) => ShellInstructions::new(""),
    };

    for handler in &config.on_output {
        instructions = instructions.on_output(output_handler(handler, ui)?);
    }

    Ok(instructions)
}

fn output_handler(config: &HandlerConfig, ui: &Arc<dyn UserInterface>) -> Result<OutputHandler> {
    let write = config.write.clone();
    let set = config.set.clone();
    let echo = config.echo;
    let ui = Arc::clone(ui);

    let handler = OutputHandler::new(move |ctx| {
        let extra = [("output", ctx.output.as_str())];
        if echo {
            ui.message(&ctx.output);
        }
        if let Some(write) = &write {
            ctx.write.write(interpolate(write, &ctx.state, &extra));
        }
        apply_set(&set, &ctx.state, &extra);
        Ok(())
    });

    match &config.expect {
        Some(pattern) => handler.expecting(pattern),
        None => Ok(handler),
    }
}

fn script_instructions(config: &StepConfig) -> ScriptInstructions {
    let set = config.set.clone();
    ScriptInstructions::new(move |state| {
        apply_set(&set, &state, &[]);
        Ok(())
    })
}

fn prompt_instructions(config: &StepConfig) -> PromptInstructions {
    let mut instructions =
        PromptInstructions::new(template(config.query.as_deref().unwrap_or_default()))
            .silent(config.silent);

    if let Some(default) = &config.default {
        instructions = instructions.default_value(template(default));
    }

    let name = config.name.clone();
    let save_as = config.save_as.clone();
    let format = config.parse;

    instructions.on_response(move |ctx| {
        if let Some(error) = &ctx.error {
            anyhow::bail!("no response to '{}': {}", name, error);
        }
        match &save_as {
            Some(key) => {
                let value = match format {
                    ResponseFormat::Bool => Value::Bool(is_affirmative(&ctx.response)),
                    ResponseFormat::String => Value::String(ctx.response),
                };
                ctx.state.set(key.as_str(), value);
            }
            None if !ctx.response.is_empty() => {
                warn!("Prompt '{}' has no save_as; response discarded", name);
            }
            None => {}
        }
        Ok(())
    })
}

/// Write `set` entries into state, interpolating string values.
fn apply_set(set: &BTreeMap<String, Value>, state: &State, extra: &[(&str, &str)]) {
    for (key, value) in set {
        let value = match value {
            Value::String(text) => Value::String(interpolate(text, state, extra)),
            other => other.clone(),
        };
        state.set(key.as_str(), value);
    }
}
