// ABOUTME: Error types for deployment sequences.
// ABOUTME: Every failure names the step it happened in so callers can react to it.

use std::time::Duration;

use crate::process::{ExecutionResult, ProcessError, StepKind};

/// Errors that stop a deployment sequence.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The tool ran and exited with a non-zero status or was killed by a signal.
    #[error("{step} step failed ({}){}", exit_text(.exit_code), output_suffix(.output))]
    ExternalToolFailure {
        step: StepKind,
        exit_code: Option<i32>,
        output: String,
    },

    /// The tool could not be started.
    #[error("{step} step could not start {program}: {source}")]
    Spawn {
        step: StepKind,
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The exit status of the tool could not be collected.
    #[error("{step} step lost track of {program}: {source}")]
    Wait {
        step: StepKind,
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The step exceeded its configured timeout and was killed.
    #[error("{step} step timed out after {}", human_duration(.after))]
    Timeout { step: StepKind, after: Duration },

    /// The step was cancelled before it finished.
    #[error("{step} step was cancelled")]
    Cancelled { step: StepKind },

    /// A single-function deployment was requested without a function name.
    #[error("single-function deployment requires a function name")]
    MissingFunctionName,

    /// The request combines parts that no step sequence can honor.
    #[error("invalid deployment request: {0}")]
    InvalidRequest(String),
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    /// The tool ran and reported failure.
    ToolFailed,
    /// The tool is missing or could not be executed.
    ToolUnavailable,
    /// The step ran past its timeout.
    TimedOut,
    /// The step was cancelled.
    Cancelled,
    /// The request itself was invalid; nothing was run.
    InvalidRequest,
}

impl DeployError {
    /// Build the failure for a step whose process exited unsuccessfully.
    pub fn tool_failure(step: StepKind, result: &ExecutionResult) -> Self {
        DeployError::ExternalToolFailure {
            step,
            exit_code: result.exit_code,
            output: result.failure_output().to_string(),
        }
    }

    /// Attach the step to a runner error.
    pub fn from_process(step: StepKind, err: ProcessError) -> Self {
        match err {
            ProcessError::Spawn { program, source } => DeployError::Spawn {
                step,
                program,
                source,
            },
            ProcessError::Wait { program, source } => DeployError::Wait {
                step,
                program,
                source,
            },
            ProcessError::Timeout { after } => DeployError::Timeout { step, after },
            ProcessError::Cancelled => DeployError::Cancelled { step },
        }
    }

    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::ExternalToolFailure { .. } => DeployErrorKind::ToolFailed,
            DeployError::Spawn { .. } | DeployError::Wait { .. } => {
                DeployErrorKind::ToolUnavailable
            }
            DeployError::Timeout { .. } => DeployErrorKind::TimedOut,
            DeployError::Cancelled { .. } => DeployErrorKind::Cancelled,
            DeployError::MissingFunctionName | DeployError::InvalidRequest(_) => {
                DeployErrorKind::InvalidRequest
            }
        }
    }

    /// The step that failed, if a step was running.
    pub fn step(&self) -> Option<StepKind> {
        match self {
            DeployError::ExternalToolFailure { step, .. }
            | DeployError::Spawn { step, .. }
            | DeployError::Wait { step, .. }
            | DeployError::Timeout { step, .. }
            | DeployError::Cancelled { step } => Some(*step),
            DeployError::MissingFunctionName | DeployError::InvalidRequest(_) => None,
        }
    }
}

fn exit_text(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

fn human_duration(after: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*after)
}

fn output_suffix(output: &str) -> String {
    if output.is_empty() {
        String::new()
    } else {
        format!(":\n{output}")
    }
}
