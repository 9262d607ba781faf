// ABOUTME: External process execution for deployment steps.
// ABOUTME: Defines the StepRunner seam and the tokio-backed runner behind it.

mod error;
mod runner;
mod step;

pub use error::ProcessError;
pub use runner::ProcessRunner;
pub use step::{ExecutionResult, ProcessStep, StepKind};

use async_trait::async_trait;

use crate::output::LogSink;

/// Runs one external process to completion.
///
/// Implementations forward output lines to `sink` while the process runs and
/// return once it has exited. A non-zero exit is an `Ok` result; `Err` is
/// reserved for cases where no exit status could be obtained.
#[async_trait]
pub trait StepRunner: Send + Sync {
    async fn run(
        &self,
        step: &ProcessStep,
        sink: &dyn LogSink,
    ) -> Result<ExecutionResult, ProcessError>;
}
