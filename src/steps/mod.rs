//! Step definitions and executors.
//!
//! This module provides the step model and everything that runs a single
//! step:
//!
//! - [`Step`] - A named, optionally conditional unit of work
//! - [`Dynamic`] - Literal-or-computed fields resolved against state
//! - [`ScriptInstructions`] / [`PromptInstructions`] - Script and prompt steps
//! - [`execute_step`] - Gate on the conditional and dispatch by kind
//!
//! Shell steps live in [`crate::shell`].
//!
//! # Example
//!
//! ```
//! use runbook::shell::ShellInstructions;
//! use runbook::steps::{PromptInstructions, Step, StepKind};
//!
//! let steps = vec![
//!     Step::prompt(
//!         "install xorg",
//!         PromptInstructions::new("install xorg display server? (y/n):")
//!             .default_value("y")
//!             .on_response(|ctx| {
//!                 ctx.state.set("xorg", runbook::steps::is_affirmative(&ctx.response));
//!                 Ok(())
//!             }),
//!     ),
//!     Step::shell("install xorg packages", ShellInstructions::sh("pacman -S --noconfirm xorg"))
//!         .only_if(|state| state.get_bool("xorg") == Some(true)),
//! ];
//!
//! assert_eq!(steps[1].kind(), StepKind::Shell);
//! ```

pub mod callback;
pub mod executor;
pub mod prompt;
pub mod script;
pub mod step;
pub mod value;

pub use callback::{Callback, CallbackFuture};
pub use executor::{execute_step, StepResult, StepStatus};
pub use prompt::{execute_prompt, is_affirmative, PromptContext, PromptInstructions};
pub use script::{execute_script, ScriptInstructions};
pub use step::{Instructions, Step, StepKind};
pub use value::{should_run, Conditional, Dynamic};
