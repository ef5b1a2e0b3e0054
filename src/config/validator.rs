//! Step file validation rules.
//!
//! - Shell steps need exactly one of `command` or `run`
//! - `args` only make sense with `command`
//! - Prompt steps need a `query`
//! - Handler `expect` patterns must be valid regular expressions

use crate::config::schema::{StepConfig, StepFile};
use crate::error::{Result, RunbookError};
use regex::Regex;

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// 1-based position of the offending step
    pub step: usize,
}

/// Validate a step file and return every problem found.
pub fn validate_step_file(file: &StepFile) -> Vec<ValidationError> {
    file.steps
        .iter()
        .enumerate()
        .flat_map(|(index, step)| validate_step(index + 1, step))
        .collect()
}

/// Validate a step file, failing on the first batch of problems.
///
/// # Errors
///
/// `ConfigValidationError` listing every problem, one per line.
pub fn validate(file: &StepFile) -> Result<()> {
    let errors = validate_step_file(file);
    if errors.is_empty() {
        return Ok(());
    }
    let message = errors
        .iter()
        .map(|e| format!("step {}: {}", e.step, e.message))
        .collect::<Vec<_>>()
        .join("\n");
    Err(RunbookError::ConfigValidationError { message })
}

fn validate_step(position: usize, step: &StepConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut push = |rule: &str, message: String| {
        errors.push(ValidationError {
            rule: rule.to_string(),
            message,
            step: position,
        });
    };

    match step.kind.as_str() {
        "shell" => {
            match (&step.command, &step.run) {
                (None, None) => push(
                    "missing-command",
                    format!("'{}' needs either 'command' or 'run'", step.name),
                ),
                (Some(_), Some(_)) => push(
                    "conflicting-command",
                    format!("'{}' has both 'command' and 'run'", step.name),
                ),
                _ => {}
            }
            if step.run.is_some() && !step.args.is_empty() {
                push(
                    "args-without-command",
                    format!("'{}' has 'args' but no 'command'", step.name),
                );
            }
            for handler in &step.on_output {
                if let Some(pattern) = &handler.expect {
                    if let Err(e) = Regex::new(pattern) {
                        push(
                            "invalid-pattern",
                            format!("'{}' has invalid pattern '{}': {}", step.name, pattern, e),
                        );
                    }
                }
            }
        }
        "prompt" => {
            if step.query.is_none() {
                push(
                    "missing-query",
                    format!("'{}' needs a 'query'", step.name),
                );
            }
        }
        _ => {}
    }

    errors
}
