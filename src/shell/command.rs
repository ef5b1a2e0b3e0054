//! Shell step execution.

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, warn};

use crate::error::{Result, RunbookError};
use crate::state::State;
use crate::steps::value::Dynamic;

use super::handler::{OutputContext, OutputHandler, StdinWriter};

/// Size of a single read from the child's stdout or stderr.
const CHUNK_SIZE: usize = 8 * 1024;

/// What a shell step runs and how it reacts to output.
#[derive(Debug, Clone)]
pub struct ShellInstructions {
    /// Program to launch. No shell is involved unless this names one.
    pub command: Dynamic<String>,

    /// Arguments, each resolved separately.
    pub args: Vec<Dynamic<String>>,

    /// Handlers offered every chunk of output, in declaration order.
    pub on_output: Vec<OutputHandler>,
}

impl ShellInstructions {
    /// Run `command` with no arguments.
    pub fn new(command: impl Into<Dynamic<String>>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            on_output: Vec::new(),
        }
    }

    /// Run `script` through `sh -c`.
    pub fn sh(script: impl Into<Dynamic<String>>) -> Self {
        Self::new("sh").arg("-c").arg(script)
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<Dynamic<String>>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Dynamic<String>>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Register an output handler.
    pub fn on_output(mut self, handler: OutputHandler) -> Self {
        self.on_output.push(handler);
        self
    }
}

/// Result of a finished shell step.
#[derive(Debug, Clone)]
pub struct ShellOutcome {
    /// Exit code (None if killed by signal). Never treated as failure here.
    pub exit_code: Option<i32>,

    /// Chunks read from stdout and stderr together.
    pub chunks: usize,

    /// Handler invocations across all chunks.
    pub handler_calls: usize,

    /// Time from spawn until every handler settled.
    pub duration: Duration,
}

impl ShellOutcome {
    /// Whether the process exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run a shell step to completion.
///
/// Returns once the process has exited and every handler future started by
/// its output has settled. The first handler error, if any, is returned after
/// all of them finish.
pub async fn execute_shell(instructions: &ShellInstructions, state: &State) -> Result<ShellOutcome> {
    let start = Instant::now();

    let command = instructions.command.resolve(state);
    let args: Vec<String> = instructions
        .args
        .iter()
        .map(|arg| arg.resolve(state))
        .collect();

    // Arguments may carry secrets; log only how many there are.
    debug!(command = %command, args = args.len(), "Spawning process");

    let mut child = Command::new(&command)
        .args(&args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RunbookError::SpawnFailed {
            command: command.clone(),
            source,
        })?;

    let (stdin, stdout, stderr) = match (child.stdin.take(), child.stdout.take(), child.stderr.take())
    {
        (Some(stdin), Some(stdout), Some(stderr)) => (stdin, stdout, stderr),
        _ => {
            return Err(RunbookError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                format!("stdio of '{}' was not captured", command),
            )))
        }
    };

    let (writer, writer_task) = StdinWriter::attach(stdin);

    // Both streams feed one channel, as in a combined output view.
    let (tx, mut rx) = mpsc::unbounded_channel();
    let stdout_task = tokio::spawn(read_chunks(stdout, tx.clone()));
    let stderr_task = tokio::spawn(read_chunks(stderr, tx));

    let mut pending = JoinSet::new();
    let mut chunks = 0;
    let mut handler_calls = 0;

    while let Some(chunk) = rx.recv().await {
        chunks += 1;
        let output = String::from_utf8_lossy(&chunk).trim().to_string();

        for handler in instructions.on_output.iter().filter(|h| h.matches(&output)) {
            handler_calls += 1;
            let context = OutputContext {
                write: writer.clone(),
                output: output.clone(),
                state: state.clone(),
            };
            pending.spawn(handler.perform(context));
        }
    }

    let finished = finish(vec![stdout_task, stderr_task], &mut child, &mut pending).await;

    drop(writer);
    writer_task.abort();
    let status = finished?;

    debug!(command = %command, exit_code = ?status.code(), "Process exited");
    if !status.success() {
        debug!("Non-zero exit from '{}' does not fail the step", command);
    }

    Ok(ShellOutcome {
        exit_code: status.code(),
        chunks,
        handler_calls,
        duration: start.elapsed(),
    })
}

/// Forward everything read from `reader` until EOF.
async fn read_chunks<R>(mut reader: R, tx: mpsc::UnboundedSender<Vec<u8>>) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 || tx.send(buf[..n].to_vec()).is_err() {
            return Ok(());
        }
    }
}

/// Join the stream readers, reap the child and settle every handler, then
/// report the first failure in that order.
async fn finish(
    readers: Vec<JoinHandle<io::Result<()>>>,
    child: &mut Child,
    pending: &mut JoinSet<anyhow::Result<()>>,
) -> Result<ExitStatus> {
    let mut read_result = Ok(());
    for reader in readers {
        let error = match reader.await {
            Ok(Ok(())) => continue,
            Ok(Err(e)) => RunbookError::Io(e),
            Err(e) => RunbookError::TaskFailed(e),
        };
        if read_result.is_ok() {
            read_result = Err(error);
        } else {
            warn!("Additional output read failure: {}", error);
        }
    }

    let status = child.wait().await;
    let settled = settle(pending).await;

    read_result?;
    let status = status?;
    settled?;
    Ok(status)
}

/// Wait for every handler future, keeping the first failure.
async fn settle(pending: &mut JoinSet<anyhow::Result<()>>) -> Result<()> {
    let mut first_error = None;

    while let Some(joined) = pending.join_next().await {
        let error = match joined {
            Ok(Ok(())) => continue,
            Ok(Err(e)) => RunbookError::Other(e),
            Err(e) => RunbookError::TaskFailed(e),
        };
        if first_error.is_none() {
            first_error = Some(error);
        } else {
            warn!("Additional output handler failure: {}", error);
        }
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
