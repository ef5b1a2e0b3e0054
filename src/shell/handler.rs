//! Output handlers for shell steps.

use regex::Regex;
use std::fmt;
use tokio::io::AsyncWriteExt;
use tokio::process::ChildStdin;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{Result, RunbookError};
use crate::state::State;
use crate::steps::callback::{self, Callback, CallbackFuture};

/// Sends input to a running child's standard input.
///
/// Writes are queued and delivered in order by a background task, so calling
/// [`StdinWriter::write`] never blocks a handler.
#[derive(Clone)]
pub struct StdinWriter {
    tx: mpsc::UnboundedSender<String>,
}

impl StdinWriter {
    /// Start a task feeding `stdin` from a new writer.
    pub(crate) fn attach(mut stdin: ChildStdin) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let task = tokio::spawn(async move {
            while let Some(input) = rx.recv().await {
                if let Err(e) = stdin.write_all(input.as_bytes()).await {
                    warn!("Could not write to child stdin: {}", e);
                    break;
                }
                if let Err(e) = stdin.flush().await {
                    warn!("Could not flush child stdin: {}", e);
                    break;
                }
            }
        });

        (Self { tx }, task)
    }

    /// A writer connected to nothing. Input is discarded.
    pub fn detached() -> Self {
        let (tx, _rx) = mpsc::unbounded_channel();
        Self { tx }
    }

    /// Queue raw input for the child. Include a trailing `\n` to submit a line.
    pub fn write(&self, input: impl Into<String>) {
        if self.tx.send(input.into()).is_err() {
            debug!("Child stdin closed, dropping input");
        }
    }

    /// Queue `line` followed by a newline.
    pub fn write_line(&self, line: &str) {
        self.write(format!("{}\n", line));
    }
}

impl fmt::Debug for StdinWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdinWriter")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

/// What an output handler receives for each matching chunk.
#[derive(Debug, Clone)]
pub struct OutputContext {
    /// Writes to the child's stdin.
    pub write: StdinWriter,
    /// The chunk, with surrounding whitespace trimmed.
    pub output: String,
    /// The run's shared state.
    pub state: State,
}

/// Pairs an optional output pattern with a callback.
///
/// Without a pattern the handler sees every chunk of output.
#[derive(Clone)]
pub struct OutputHandler {
    expect: Option<Regex>,
    perform: Callback<OutputContext>,
}

impl OutputHandler {
    /// Handler running a synchronous closure.
    pub fn new<F>(perform: F) -> Self
    where
        F: Fn(OutputContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            expect: None,
            perform: callback::from_fn(perform),
        }
    }

    /// Handler whose work completes later. The step waits for it.
    pub fn new_async<F, Fut>(perform: F) -> Self
    where
        F: Fn(OutputContext) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            expect: None,
            perform: callback::from_async(perform),
        }
    }

    /// Only fire for chunks matching `pattern`.
    pub fn with_expect(mut self, pattern: Regex) -> Self {
        self.expect = Some(pattern);
        self
    }

    /// Only fire for chunks matching the regular expression `pattern`.
    pub fn expecting(self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| RunbookError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(self.with_expect(regex))
    }

    /// The pattern, if any.
    pub fn expect(&self) -> Option<&Regex> {
        self.expect.as_ref()
    }

    /// Whether this handler fires for `output`.
    pub fn matches(&self, output: &str) -> bool {
        self.expect
            .as_ref()
            .map_or(true, |pattern| pattern.is_match(output))
    }

    /// Invoke the callback.
    pub fn perform(&self, context: OutputContext) -> CallbackFuture {
        (self.perform)(context)
    }
}

impl fmt::Debug for OutputHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputHandler")
            .field("expect", &self.expect.as_ref().map(Regex::as_str))
            .finish_non_exhaustive()
    }
}
