// ABOUTME: Execution of one step sequence and its observable state.
// ABOUTME: Pending -> Running(i) -> Running(i+1) | Failed(i) | Completed; failure stops the sequence.

use crate::output::LogSink;
use crate::process::{ProcessStep, StepRunner};

use super::error::DeployError;
use super::plan::StepPlan;

/// Where a sequence is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    /// Nothing has run yet.
    Pending,
    /// The step at this index is running.
    Running { step: usize },
    /// The step at this index failed; later steps were not attempted.
    Failed { step: usize },
    /// Every step exited successfully.
    Completed,
}

/// An ordered list of steps run strictly one after another.
#[derive(Debug)]
pub struct Sequence {
    steps: StepPlan,
    state: SequenceState,
}

impl Sequence {
    pub fn new(steps: StepPlan) -> Self {
        Self {
            steps,
            state: SequenceState::Pending,
        }
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    /// Run every step in order. Step N+1 starts only after step N has exited
    /// with status 0; the first failure is logged and returned.
    pub async fn execute<R>(&mut self, runner: &R, sink: &dyn LogSink) -> Result<(), DeployError>
    where
        R: StepRunner + ?Sized,
    {
        let steps: Vec<ProcessStep> = self.steps.iter().cloned().collect();

        for (index, step) in steps.iter().enumerate() {
            self.transition(SequenceState::Running { step: index });
            sink.progress(&format!("  → {}", step.command_line()));

            let outcome = match runner.run(step, sink).await {
                Ok(result) if result.success() => Ok(()),
                Ok(result) => Err(DeployError::tool_failure(step.kind, &result)),
                Err(e) => Err(DeployError::from_process(step.kind, e)),
            };

            if let Err(e) = outcome {
                self.transition(SequenceState::Failed { step: index });
                sink.error(&e.to_string());
                return Err(e);
            }

            sink.success(&step.success_message);
        }

        self.transition(SequenceState::Completed);
        Ok(())
    }

    fn transition(&mut self, next: SequenceState) {
        tracing::debug!(from = ?self.state, to = ?next, "sequence transition");
        self.state = next;
    }
}
