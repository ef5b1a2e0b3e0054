//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Runbook - Run declarative, interactive automation step files.
#[derive(Debug, Parser)]
#[command(name = "runbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Minimal output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run every step in a step file
    Run(RunArgs),

    /// List the steps in a step file without running them
    List(ListArgs),
}

impl Commands {
    /// Whether this command may ask the operator questions on a terminal.
    pub fn is_interactive(&self) -> bool {
        match self {
            Commands::Run(args) => !args.non_interactive,
            Commands::List(_) => false,
        }
    }
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Step file to run
    pub file: PathBuf,

    /// Read prompt answers line by line from stdin even on a terminal
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
    /// Step file to list
    pub file: PathBuf,
}
