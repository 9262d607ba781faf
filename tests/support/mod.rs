// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted step runner, a recording log sink, and fake tool scripts.

use async_trait::async_trait;
use openfaas_deploy::output::{LogSink, Stream};
use openfaas_deploy::process::{
    ExecutionResult, ProcessError, ProcessStep, StepKind, StepRunner,
};
use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Step runner that records every invocation and answers with scripted exit codes.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingRunner {
    invoked: Mutex<Vec<ProcessStep>>,
    exit_codes: HashMap<StepKind, i32>,
    stderr: HashMap<StepKind, String>,
    cancelled: Option<StepKind>,
}

#[allow(dead_code)]
impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make steps of this kind exit with `code` and write `stderr`.
    pub fn failing(mut self, kind: StepKind, code: i32, stderr: &str) -> Self {
        self.exit_codes.insert(kind, code);
        self.stderr.insert(kind, stderr.to_string());
        self
    }

    /// Make steps of this kind end as if cancelled.
    pub fn cancelled_at(mut self, kind: StepKind) -> Self {
        self.cancelled = Some(kind);
        self
    }

    pub fn invoked(&self) -> Vec<ProcessStep> {
        self.invoked.lock().unwrap().clone()
    }

    pub fn invoked_kinds(&self) -> Vec<StepKind> {
        self.invoked().iter().map(|s| s.kind).collect()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.invoked().iter().map(ProcessStep::command_line).collect()
    }
}

#[async_trait]
impl StepRunner for RecordingRunner {
    async fn run(
        &self,
        step: &ProcessStep,
        sink: &dyn LogSink,
    ) -> Result<ExecutionResult, ProcessError> {
        self.invoked.lock().unwrap().push(step.clone());

        if self.cancelled == Some(step.kind) {
            return Err(ProcessError::Cancelled);
        }

        let stdout = format!("ran {}", step.kind);
        sink.step_output(Stream::Stdout, &stdout);

        let stderr = self.stderr.get(&step.kind).cloned().unwrap_or_default();
        if !stderr.is_empty() {
            sink.step_output(Stream::Stderr, &stderr);
        }

        Ok(ExecutionResult {
            exit_code: Some(self.exit_codes.get(&step.kind).copied().unwrap_or(0)),
            output: format!("{stdout}\n{stderr}"),
            stderr,
        })
    }
}

/// One message delivered to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Logged {
    Progress(String),
    Success(String),
    Warning(String),
    Error(String),
    Output(Stream, String),
}

/// Log sink that keeps every message in order.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingSink {
    messages: Mutex<Vec<Logged>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn messages(&self) -> Vec<Logged> {
        self.messages.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                Logged::Success(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                Logged::Error(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self, stream: Stream) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                Logged::Output(s, line) if s == stream => Some(line),
                _ => None,
            })
            .collect()
    }

    fn push(&self, message: Logged) {
        self.messages.lock().unwrap().push(message);
    }
}

impl LogSink for RecordingSink {
    fn progress(&self, message: &str) {
        self.push(Logged::Progress(message.to_string()));
    }

    fn success(&self, message: &str) {
        self.push(Logged::Success(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.push(Logged::Warning(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Logged::Error(message.to_string()));
    }

    fn step_output(&self, stream: Stream, line: &str) {
        self.push(Logged::Output(stream, line.to_string()));
    }
}

/// Write an executable shell script into `dir`.
#[allow(dead_code)]
pub fn write_script(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, script).unwrap();

    // Make executable
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Write a fake tool that appends its name and arguments to `log` and exits
/// with `exit_code`.
#[allow(dead_code)]
pub fn write_fake_tool(dir: &Path, name: &str, log: &Path, exit_code: i32) -> PathBuf {
    write_script(
        dir,
        name,
        &format!(
            "#!/bin/sh\necho \"{name} $*\" >> '{}'\necho \"{name} output\"\n[ {exit_code} -eq 0 ] || echo \"{name} broke\" >&2\nexit {exit_code}\n",
            log.display()
        ),
    )
}
