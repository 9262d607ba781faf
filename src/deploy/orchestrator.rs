// ABOUTME: Deployment orchestrator: maps each deployment mode to a step sequence and runs it.
// ABOUTME: The process runner and log sink are injected so callers control both seams.

use crate::output::LogSink;
use crate::process::StepRunner;
use crate::types::FunctionName;

use super::error::DeployError;
use super::plan::{StepPlan, Tools};
use super::request::{DeployMode, DeploymentRequest};
use super::state::Sequence;

pub struct Orchestrator<R, S> {
    runner: R,
    sink: S,
    tools: Tools,
}

impl<R: StepRunner, S: LogSink> Orchestrator<R, S> {
    pub fn new(runner: R, sink: S, tools: Tools) -> Self {
        Self {
            runner,
            sink,
            tools,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn tools(&self) -> &Tools {
        &self.tools
    }

    /// The steps `request` would run, without running them.
    pub fn plan(&self, request: &DeploymentRequest) -> Result<StepPlan, DeployError> {
        self.tools.plan(request)
    }

    /// Package, push, and deploy the whole stack, labelling it for
    /// scale-to-zero when asked.
    pub async fn run_full(&self, scale_to_zero: bool) -> Result<(), DeployError> {
        let request = if scale_to_zero {
            DeploymentRequest::push_and_scale_zero(self.tools.scale_zero_label.clone())
        } else {
            DeploymentRequest::push()
        };
        self.run(&request).await
    }

    /// Deploy the whole stack as it is, without packaging or pushing.
    pub async fn run_deploy(&self) -> Result<(), DeployError> {
        self.run(&DeploymentRequest::full()).await
    }

    /// Deploy one function, pushing its image first if `also_push` is set.
    pub async fn run_single_function(
        &self,
        name: &FunctionName,
        also_push: bool,
    ) -> Result<(), DeployError> {
        self.run(&DeploymentRequest::single_function(name.clone(), also_push))
            .await
    }

    /// List deployed functions; the listing is streamed to the sink.
    pub async fn run_list(&self) -> Result<(), DeployError> {
        self.run(&DeploymentRequest::list()).await
    }

    /// Run the sequence for `request`, stopping at the first failing step.
    pub async fn run(&self, request: &DeploymentRequest) -> Result<(), DeployError> {
        let plan = self.plan(request)?;

        match request.mode() {
            DeployMode::PushAndScaleZero => self.sink.progress("Scale to zero active"),
            DeployMode::Push => self.sink.progress("Scale to zero disabled"),
            _ => {}
        }

        tracing::info!(mode = ?request.mode(), steps = plan.len(), "running deployment sequence");

        let mut sequence = Sequence::new(plan);
        let result = sequence.execute(&self.runner, &self.sink).await;
        tracing::debug!(state = ?sequence.state(), "deployment sequence finished");
        result
    }
}
