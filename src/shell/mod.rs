//! Shell steps: spawning a process and reacting to its output.

pub mod command;
pub mod handler;

pub use command::{execute_shell, ShellInstructions, ShellOutcome};
pub use handler::{OutputContext, OutputHandler, StdinWriter};
