// ABOUTME: Description of a single external tool invocation and its outcome.
// ABOUTME: Steps are built fresh per run and carry their own success message.

use std::fmt;

/// The role a step plays in a deployment sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// Build function images with the packaging tool.
    Package,
    /// Push images to the registry.
    Push,
    /// Deploy functions to the cluster.
    Deploy,
    /// List deployed functions.
    List,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Package => "package",
            StepKind::Push => "push",
            StepKind::Deploy => "deploy",
            StepKind::List => "list",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One external invocation: program, exact argument list, and the message
/// logged when it exits with status 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessStep {
    pub kind: StepKind,
    pub program: String,
    pub args: Vec<String>,
    pub success_message: String,
}

impl ProcessStep {
    pub fn new<I, A>(
        kind: StepKind,
        program: impl Into<String>,
        args: I,
        success_message: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            kind,
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            success_message: success_message.into(),
        }
    }

    /// The invocation as it would be typed in a shell, for display only.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Outcome of a process that ran to exit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Exit code, or None if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// All captured lines from stdout and stderr, in arrival order.
    pub output: String,
    /// Captured stderr lines only.
    pub stderr: String,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Text to report when the step failed: stderr if the tool wrote any,
    /// otherwise everything it printed.
    pub fn failure_output(&self) -> &str {
        if self.stderr.trim().is_empty() {
            self.output.trim_end()
        } else {
            self.stderr.trim_end()
        }
    }
}
