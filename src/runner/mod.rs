//! Step execution orchestration.

pub mod workflow;

pub use workflow::{run, RunReport, Runner};
