// ABOUTME: Output formatting for CLI feedback and the log sink seam.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::time::Instant;

/// Which pipe of an external tool a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Destination for everything the orchestrator reports.
///
/// Passed into the orchestrator at construction so callers decide where
/// progress, tool output and failures end up.
pub trait LogSink: Send + Sync {
    /// A progress message about what is about to happen.
    fn progress(&self, message: &str);

    /// A step or command finished successfully.
    fn success(&self, message: &str);

    /// Something worth noting that does not fail the command.
    fn warning(&self, message: &str);

    /// A failure, including captured tool output.
    fn error(&self, message: &str);

    /// One line of output from a running external tool.
    fn step_output(&self, stream: Stream, line: &str);
}

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (tool output and final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    fn emit_json(&self, event: JsonEvent<'_>, to_stderr: bool) {
        if let Ok(json) = serde_json::to_string(&event) {
            if to_stderr {
                eprintln!("{json}");
            } else {
                println!("{json}");
            }
        }
    }
}

impl LogSink for Output {
    /// Print a progress message (suppressed in quiet mode).
    fn progress(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => println!("{message}"),
            OutputMode::Quiet => {}
            OutputMode::Json => self.emit_json(JsonEvent::new("progress", message), false),
        }
    }

    /// Print a success message with optional timing.
    fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                // Print only the essential result
                println!("{message}");
            }
            OutputMode::Json => {
                let mut event = JsonEvent::new("success", message);
                event.duration_secs = self.duration();
                self.emit_json(event, false);
            }
        }
    }

    fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {message}"),
            OutputMode::Json => self.emit_json(JsonEvent::new("warning", message), true),
        }
    }

    /// Print an error message.
    fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let mut event = JsonEvent::new("error", message);
                event.duration_secs = self.duration();
                self.emit_json(event, true);
            }
        }
    }

    fn step_output(&self, stream: Stream, line: &str) {
        match (self.mode, stream) {
            (OutputMode::Normal | OutputMode::Quiet, Stream::Stdout) => println!("{line}"),
            (OutputMode::Normal | OutputMode::Quiet, Stream::Stderr) => eprintln!("{line}"),
            (OutputMode::Json, stream) => {
                let mut event = JsonEvent::new("output", line);
                event.stream = Some(stream);
                self.emit_json(event, false);
            }
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<Stream>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

impl<'a> JsonEvent<'a> {
    fn new(event: &'a str, message: &'a str) -> Self {
        Self {
            event,
            message,
            timestamp: chrono::Utc::now().to_rfc3339(),
            stream: None,
            duration_secs: None,
        }
    }
}
