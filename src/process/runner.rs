// ABOUTME: tokio-backed runner that spawns a step's program and streams its output.
// ABOUTME: Supports an optional per-step timeout and cancellation via CancellationToken.

use async_trait::async_trait;
use snafu::ResultExt;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::error::{ProcessError, SpawnSnafu, WaitSnafu};
use super::step::{ExecutionResult, ProcessStep};
use super::StepRunner;
use crate::output::{LogSink, Stream};

/// Runs steps as child processes of the current process.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
    cancel: CancellationToken,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run programs in this directory instead of the current one.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Kill a step that has not exited after this long.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Kill the running step when this token is cancelled.
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    fn command(&self, step: &ProcessStep) -> Command {
        let mut command = Command::new(&step.program);
        command
            .args(&step.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(ref dir) = self.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

#[async_trait]
impl StepRunner for ProcessRunner {
    async fn run(
        &self,
        step: &ProcessStep,
        sink: &dyn LogSink,
    ) -> Result<ExecutionResult, ProcessError> {
        tracing::debug!(step = %step.kind, command = %step.command_line(), "spawning step");

        if self.cancel.is_cancelled() {
            return Err(ProcessError::Cancelled);
        }

        let mut child = self.command(step).spawn().context(SpawnSnafu {
            program: step.program.clone(),
        })?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        forward_lines(child.stdout.take(), Stream::Stdout, tx.clone());
        forward_lines(child.stderr.take(), Stream::Stderr, tx);

        let mut result = ExecutionResult::default();

        let deadline = self.timeout.map(|t| Instant::now() + t);
        let expired = async {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };
        tokio::pin!(expired);

        // Cancellation and the timeout stay armed until both pipes close, since
        // a background process left behind by the tool can hold them open.
        let mut status = None;
        let mut output_open = true;
        let status = loop {
            if let Some(status) = status.filter(|_| !output_open) {
                break status;
            }

            tokio::select! {
                line = rx.recv(), if output_open => match line {
                    Some((stream, line)) => record_line(&mut result, sink, stream, line),
                    None => output_open = false,
                },
                exit = child.wait(), if status.is_none() => {
                    status = Some(exit.context(WaitSnafu { program: step.program.clone() })?);
                }
                _ = self.cancel.cancelled() => {
                    tracing::warn!(step = %step.kind, "step cancelled, killing process");
                    stop(&mut child, status.is_some(), step, sink).await;
                    return Err(ProcessError::Cancelled);
                }
                _ = &mut expired => {
                    let after = self.timeout.unwrap_or_default();
                    tracing::error!(step = %step.kind, ?after, "step timed out, killing process");
                    stop(&mut child, status.is_some(), step, sink).await;
                    return Err(ProcessError::Timeout { after });
                }
            }
        };

        result.exit_code = status.code();
        tracing::debug!(step = %step.kind, exit_code = ?result.exit_code, "step exited");

        Ok(result)
    }
}

fn forward_lines<R>(pipe: Option<R>, stream: Stream, tx: mpsc::UnboundedSender<(Stream, String)>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let Some(pipe) = pipe else {
        return;
    };

    tokio::spawn(async move {
        let mut lines = BufReader::new(pipe).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send((stream, line)).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(?stream, error = %e, "stopped reading tool output");
                    break;
                }
            }
        }
    });
}

fn record_line(result: &mut ExecutionResult, sink: &dyn LogSink, stream: Stream, line: String) {
    sink.step_output(stream, &line);
    if stream == Stream::Stderr {
        result.stderr.push_str(&line);
        result.stderr.push('\n');
    }
    result.output.push_str(&line);
    result.output.push('\n');
}

/// Kill the child if it is still running. If it already exited, whatever is
/// holding its output open is outside our reach, so only report it.
async fn stop(child: &mut Child, exited: bool, step: &ProcessStep, sink: &dyn LogSink) {
    if exited {
        sink.warning(&format!(
            "{} exited but a background process it started still holds its output",
            step.kind
        ));
        return;
    }

    if let Err(e) = child.kill().await {
        tracing::warn!(step = %step.kind, error = %e, "failed to kill process");
        sink.warning(&format!("failed to kill {}: {e}", step.program));
    }
}
