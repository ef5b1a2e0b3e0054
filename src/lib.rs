//! Runbook - declarative, interactive automation steps.
//!
//! A run is an ordered list of [`steps::Step`]s sharing one mutable
//! [`state::State`]. Each step is a shell command whose output can be
//! answered, a script callback, or a prompt for the operator. Later steps
//! read earlier answers through computed names, arguments and conditionals.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - YAML step files
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Sequential step execution with progress
//! - [`shell`] - Process spawning and output handlers
//! - [`state`] - Shared run state
//! - [`steps`] - Step model, values, script and prompt executors
//! - [`ui`] - Terminal output and prompts
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use runbook::runner::Runner;
//! use runbook::steps::{ScriptInstructions, Step};
//! use runbook::ui::{MockUI, UserInterface};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let ui: Arc<dyn UserInterface> = Arc::new(MockUI::new());
//! let steps = vec![
//!     Step::script("pick disk", ScriptInstructions::new(|state| {
//!         state.set("disk", "/dev/sda");
//!         Ok(())
//!     })),
//!     Step::script("skipped", ScriptInstructions::new(|_| Ok(())))
//!         .only_if(|state| state.get_str("disk").is_none()),
//! ];
//!
//! let report = Runner::new(ui).run(&steps).await.unwrap();
//! assert_eq!(report.state.get_str("disk").as_deref(), Some("/dev/sda"));
//! assert_eq!(report.skipped_count(), 1);
//! # });
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod shell;
pub mod state;
pub mod steps;
pub mod ui;

pub use error::{Result, RunbookError};
