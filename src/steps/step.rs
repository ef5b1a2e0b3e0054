//! Step definitions.

use std::fmt;

use crate::shell::ShellInstructions;
use crate::state::State;

use super::prompt::PromptInstructions;
use super::script::ScriptInstructions;
use super::value::{Conditional, Dynamic};

/// Which executor handles a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Spawn a process.
    Shell,
    /// Run a callback.
    Script,
    /// Ask the operator.
    Prompt,
    /// Not understood by this engine; completes without doing anything.
    Unknown,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepKind::Shell => "shell",
            StepKind::Script => "script",
            StepKind::Prompt => "prompt",
            StepKind::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// The kind-specific part of a step.
#[derive(Debug, Clone)]
pub enum Instructions {
    Shell(ShellInstructions),
    Script(ScriptInstructions),
    Prompt(PromptInstructions),
    /// A kind this engine does not implement, by name.
    Unknown(String),
}

/// One unit of a run.
#[derive(Debug, Clone)]
pub struct Step {
    /// Display name, possibly derived from earlier answers.
    pub name: Dynamic<String>,
    /// Whether the step runs. Defaults to always.
    pub conditional: Conditional,
    /// What to do.
    pub instructions: Instructions,
}

impl Step {
    /// Create a step that always runs.
    pub fn new(name: impl Into<Dynamic<String>>, instructions: Instructions) -> Self {
        Self {
            name: name.into(),
            conditional: Conditional::default(),
            instructions,
        }
    }

    /// Create a shell step.
    pub fn shell(name: impl Into<Dynamic<String>>, instructions: ShellInstructions) -> Self {
        Self::new(name, Instructions::Shell(instructions))
    }

    /// Create a script step.
    pub fn script(name: impl Into<Dynamic<String>>, instructions: ScriptInstructions) -> Self {
        Self::new(name, Instructions::Script(instructions))
    }

    /// Create a prompt step.
    pub fn prompt(name: impl Into<Dynamic<String>>, instructions: PromptInstructions) -> Self {
        Self::new(name, Instructions::Prompt(instructions))
    }

    /// Create a step of a kind this engine does not implement.
    pub fn unknown(name: impl Into<Dynamic<String>>, kind: impl Into<String>) -> Self {
        Self::new(name, Instructions::Unknown(kind.into()))
    }

    /// Replace the conditional.
    pub fn when(mut self, conditional: impl Into<Conditional>) -> Self {
        self.conditional = conditional.into();
        self
    }

    /// Run only when `f` returns true for the current state.
    pub fn only_if<F>(self, f: F) -> Self
    where
        F: Fn(&State) -> bool + Send + Sync + 'static,
    {
        self.when(Conditional::computed(f))
    }

    /// The executor kind.
    pub fn kind(&self) -> StepKind {
        match &self.instructions {
            Instructions::Shell(_) => StepKind::Shell,
            Instructions::Script(_) => StepKind::Script,
            Instructions::Prompt(_) => StepKind::Prompt,
            Instructions::Unknown(_) => StepKind::Unknown,
        }
    }
}
