// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use openfaas_deploy::deploy::{DeployError, DeployMode, DeploymentRequest};
use openfaas_deploy::output::OutputMode;
use openfaas_deploy::types::FunctionName;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "openfaas-deploy")]
#[command(about = "Deploy functions to an OpenFaaS cluster with faas-cli")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print tool output and the final result
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print JSON lines instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the config file (default: discovered in the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an openfaas-deploy.yml configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Deploy OpenFaaS functions
    Deploy(DeployArgs),
}

#[derive(Args)]
pub struct DeployArgs {
    /// Push image to Docker repository
    #[arg(short, long, global = true)]
    pub push: bool,

    /// Push image to Docker repository and allow scale to zero
    #[arg(
        short = 'z',
        long = "push-and-scale-zero",
        alias = "pushAndScaleZero",
        global = true,
        conflicts_with = "push"
    )]
    pub push_and_scale_zero: bool,

    /// Kill any step that runs longer than this (e.g. 90s, 10m)
    #[arg(long, global = true, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Print the commands that would run without running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub action: Option<DeployAction>,
}

#[derive(Subcommand)]
pub enum DeployAction {
    /// Deploy a single function
    #[command(short_flag = 'f', long_flag = "function")]
    Function {
        /// Function name as declared in the stack file
        name: FunctionName,
    },

    /// List all OpenFaaS functions
    #[command(short_flag = 'l')]
    List,
}

impl DeployArgs {
    /// Build the request these flags describe. Flags that do not apply to the
    /// chosen action are rejected rather than dropped, wherever they appear.
    pub fn request(&self, scale_zero_label: &str) -> Result<DeploymentRequest, DeployError> {
        let (mode, function_filter) = match &self.action {
            Some(DeployAction::Function { name }) => {
                (DeployMode::SingleFunction, Some(name.clone()))
            }
            Some(DeployAction::List) => (DeployMode::List, None),
            None if self.push_and_scale_zero => (DeployMode::PushAndScaleZero, None),
            None if self.push => (DeployMode::Push, None),
            None => (DeployMode::Full, None),
        };
        let label = self.push_and_scale_zero.then(|| scale_zero_label.to_string());
        let also_push = self.push && self.action.is_some();

        DeploymentRequest::new(mode, function_filter, label, also_push)
    }
}
