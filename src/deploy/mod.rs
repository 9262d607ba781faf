// ABOUTME: Deployment orchestration over external OpenFaaS tooling.
// ABOUTME: Exports the request model, step planning, sequence state, and orchestrator.

mod error;
mod orchestrator;
mod plan;
mod request;
mod state;

pub use error::{DeployError, DeployErrorKind};
pub use orchestrator::Orchestrator;
pub use plan::{
    DEFAULT_FAAS_CLI, DEFAULT_LABEL_FLAG, DEFAULT_PACKAGER, DEFAULT_STACK_FILE,
    SCALE_ZERO_LABEL, StepPlan, Tools,
};
pub use request::{DeployMode, DeploymentRequest};
pub use state::{Sequence, SequenceState};
