//! Line-based UI for piped or headless input.

use std::io::{self, BufRead, Write};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::error::Result;

use super::progress::{format_duration, format_progress};
use super::{OutputMode, Prompt, UserInterface};

/// UI implementation that reads answers one line at a time.
///
/// Used when stdin or stdout is not a terminal, e.g. when answers are piped
/// in from a file. Input is never echoed, so silent prompts need no masking.
pub struct NonInteractiveUI {
    mode: OutputMode,
    input: Mutex<Box<dyn BufRead + Send>>,
}

impl NonInteractiveUI {
    /// Create a UI reading from stdin.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_input(mode, Box::new(io::BufReader::new(io::stdin())))
    }

    /// Create a UI reading from the given source.
    pub fn with_input(mode: OutputMode, input: Box<dyn BufRead + Send>) -> Self {
        Self {
            mode,
            input: Mutex::new(input),
        }
    }

    fn read_line(&self) -> io::Result<String> {
        let mut input = self.input.lock().unwrap_or_else(PoisonError::into_inner);
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl UserInterface for NonInteractiveUI {
    fn message(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_header(&self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_progress(&self, percent: f64, name: &str) {
        if !self.mode.shows_status() {
            return;
        }
        if let Some(line) = format_progress(percent, name) {
            println!("{}", line);
        }
    }

    fn show_completion(&self, steps: usize, elapsed: Duration) {
        if self.mode.shows_status() {
            let label = if steps == 1 { "step" } else { "steps" };
            println!(
                "✓ Completed {} {} in {}",
                steps,
                label,
                format_duration(elapsed)
            );
        }
    }

    fn prompt(&self, prompt: &Prompt) -> Result<String> {
        let marker = match &prompt.default {
            Some(default) => format!("[{}] > ", default),
            None => "> ".to_string(),
        };
        print!("\n{}\n{}", prompt.query, marker);
        io::stdout().flush()?;

        let line = self.read_line();
        println!();
        Ok(line?)
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
