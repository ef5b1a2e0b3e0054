//! Error types for runbook operations.
//!
//! This module defines [`RunbookError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `RunbookError` for failures the engine or CLI handles distinctly
//! - Step callbacks return `anyhow::Result<()>`; their errors arrive as
//!   `RunbookError::Other`
//! - The runner wraps whatever an executor returns in
//!   [`RunbookError::StepFailed`] so the failing step is always named

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for runbook operations.
#[derive(Debug, Error)]
pub enum RunbookError {
    /// Step file not found at the given location.
    #[error("Step file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a step file.
    #[error("Failed to parse step file at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Step file parsed but describes an invalid step.
    #[error("Invalid step definition: {message}")]
    ConfigValidationError { message: String },

    /// An output handler pattern is not a valid regular expression.
    #[error("Invalid output pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The external command could not be started.
    #[error("Failed to start '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A step's executor failed; the run stops here.
    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: Box<RunbookError>,
    },

    /// A background stream reader or blocking prompt task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors returned by caller-supplied callbacks.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RunbookError {
    /// Wrap an executor error with the name of the step that produced it.
    pub fn in_step(self, step: &str) -> Self {
        RunbookError::StepFailed {
            step: step.to_string(),
            source: Box::new(self),
        }
    }

    /// Name of the failing step, if this error came out of the runner.
    pub fn step_name(&self) -> Option<&str> {
        match self {
            RunbookError::StepFailed { step, .. } => Some(step),
            _ => None,
        }
    }
}

/// Result type alias for runbook operations.
pub type Result<T> = std::result::Result<T, RunbookError>;
