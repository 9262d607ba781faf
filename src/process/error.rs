// ABOUTME: Process execution error types with SNAFU pattern.
// ABOUTME: Separates spawn, wait, timeout, and cancellation failures.

use snafu::Snafu;
use std::time::Duration;

/// Failure to obtain an exit status from an external process.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProcessError {
    #[snafu(display("failed to start {program}: {source}"))]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display("failed waiting for {program}: {source}"))]
    Wait {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display("timed out after {}", humantime::format_duration(*after)))]
    Timeout { after: Duration },

    #[snafu(display("cancelled"))]
    Cancelled,
}

impl ProcessError {
    /// Whether the tool could not be found or executed at all.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProcessError::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
