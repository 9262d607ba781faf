// ABOUTME: Step planning: turns a deployment request into exact tool invocations.
// ABOUTME: Argument lists here are the contract with faas-cli and the packaging tool.

use nonempty::{NonEmpty, nonempty};

use crate::process::{ProcessStep, StepKind};
use crate::types::FunctionName;

use super::error::DeployError;
use super::request::{DeployMode, DeploymentRequest};

pub const DEFAULT_FAAS_CLI: &str = "faas-cli";
pub const DEFAULT_PACKAGER: &str = "serverless";
pub const DEFAULT_STACK_FILE: &str = "./serverless.yml";

/// Label flag passed to `faas-cli deploy`, kept with its historical spelling.
pub const DEFAULT_LABEL_FLAG: &str = "-lable";

/// Annotation that lets OpenFaaS scale an idle function down to zero replicas.
pub const SCALE_ZERO_LABEL: &str = "com.openfaas.scale.zero=true";

/// Ordered steps for one request. Never empty.
pub type StepPlan = NonEmpty<ProcessStep>;

/// Programs and fixed arguments used to build steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tools {
    pub faas_cli: String,
    pub packager: String,
    pub stack_file: String,
    pub label_flag: String,
    pub scale_zero_label: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            faas_cli: DEFAULT_FAAS_CLI.to_string(),
            packager: DEFAULT_PACKAGER.to_string(),
            stack_file: DEFAULT_STACK_FILE.to_string(),
            label_flag: DEFAULT_LABEL_FLAG.to_string(),
            scale_zero_label: SCALE_ZERO_LABEL.to_string(),
        }
    }
}

impl Tools {
    /// `<packager> package`
    pub fn package(&self) -> ProcessStep {
        ProcessStep::new(
            StepKind::Package,
            &self.packager,
            ["package"],
            "Function(s) packaged...",
        )
    }

    /// `faas-cli push -f <stack> [--filter <name>]`
    pub fn push(&self, filter: Option<&FunctionName>) -> ProcessStep {
        let mut args = self.stack_args("push");
        let message = match filter {
            Some(name) => {
                args.extend(["--filter".to_string(), name.to_string()]);
                format!("Pushed {name}")
            }
            None => "Function(s) pushed...".to_string(),
        };
        ProcessStep::new(StepKind::Push, &self.faas_cli, args, message)
    }

    /// `faas-cli deploy -f <stack> [--filter <name>] [<label flag> <label>]`
    pub fn deploy(&self, filter: Option<&FunctionName>, label: Option<&str>) -> ProcessStep {
        let mut args = self.stack_args("deploy");
        let message = match filter {
            Some(name) => {
                args.extend(["--filter".to_string(), name.to_string()]);
                format!("Deployed {name}")
            }
            None => "Function(s) deployed...".to_string(),
        };
        if let Some(label) = label {
            args.extend([self.label_flag.clone(), label.to_string()]);
        }
        ProcessStep::new(StepKind::Deploy, &self.faas_cli, args, message)
    }

    /// `faas-cli list -f <stack>`
    pub fn list(&self) -> ProcessStep {
        ProcessStep::new(
            StepKind::List,
            &self.faas_cli,
            self.stack_args("list"),
            "Listed functions",
        )
    }

    /// Package, push, then deploy the whole stack.
    pub fn full_plan(&self, label: Option<&str>) -> StepPlan {
        nonempty![self.package(), self.push(None), self.deploy(None, label)]
    }

    pub fn single_function_plan(&self, name: &FunctionName, also_push: bool) -> StepPlan {
        if also_push {
            nonempty![self.push(Some(name)), self.deploy(Some(name), None)]
        } else {
            nonempty![self.deploy(Some(name), None)]
        }
    }

    /// The exact step sequence a request runs.
    pub fn plan(&self, request: &DeploymentRequest) -> Result<StepPlan, DeployError> {
        let plan = match request.mode() {
            DeployMode::Full => nonempty![self.deploy(None, None)],
            DeployMode::Push | DeployMode::PushAndScaleZero => self.full_plan(request.label()),
            DeployMode::SingleFunction => {
                let name = request
                    .function_filter()
                    .ok_or(DeployError::MissingFunctionName)?;
                self.single_function_plan(name, request.also_push())
            }
            DeployMode::List => nonempty![self.list()],
        };
        Ok(plan)
    }

    fn stack_args(&self, subcommand: &str) -> Vec<String> {
        vec![
            subcommand.to_string(),
            "-f".to_string(),
            self.stack_file.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(step: &ProcessStep) -> Vec<&str> {
        step.args.iter().map(String::as_str).collect()
    }

    #[test]
    fn package_runs_packager() {
        let step = Tools::default().package();
        assert_eq!(step.program, "serverless");
        assert_eq!(args(&step), ["package"]);
    }

    #[test]
    fn deploy_with_label_uses_configured_flag() {
        let tools = Tools {
            label_flag: "--label".to_string(),
            ..Tools::default()
        };
        let step = tools.deploy(None, Some(SCALE_ZERO_LABEL));
        assert_eq!(
            args(&step),
            [
                "deploy",
                "-f",
                "./serverless.yml",
                "--label",
                "com.openfaas.scale.zero=true"
            ]
        );
    }

    #[test]
    fn custom_stack_file_is_used_everywhere() {
        let tools = Tools {
            stack_file: "stack.yml".to_string(),
            ..Tools::default()
        };
        assert_eq!(args(&tools.list()), ["list", "-f", "stack.yml"]);
        assert_eq!(args(&tools.push(None)), ["push", "-f", "stack.yml"]);
    }

    #[test]
    fn filtered_steps_name_the_function() {
        let name = FunctionName::new("figlet").unwrap();
        let tools = Tools::default();
        assert_eq!(tools.push(Some(&name)).success_message, "Pushed figlet");
        assert_eq!(tools.deploy(Some(&name), None).success_message, "Deployed figlet");
    }
}
