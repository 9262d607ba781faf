// ABOUTME: Deploy command implementation.
// ABOUTME: Builds the process runner from config and hands the request to the orchestrator.

use openfaas_deploy::config::Config;
use openfaas_deploy::deploy::{DeploymentRequest, Orchestrator};
use openfaas_deploy::error::Result;
use openfaas_deploy::output::{LogSink, Output};
use openfaas_deploy::process::ProcessRunner;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Per-invocation options that are not part of the request itself.
#[derive(Debug, Default)]
pub struct DeployOptions {
    /// Overrides `step_timeout` from the config file.
    pub timeout: Option<Duration>,
    pub dry_run: bool,
}

/// Run the step sequence for `request`.
pub async fn deploy(
    config: Config,
    request: DeploymentRequest,
    options: DeployOptions,
    mut output: Output,
    cancel: CancellationToken,
) -> Result<()> {
    let tools = config.tools();

    if options.dry_run {
        for step in tools.plan(&request)? {
            println!("{}", step.command_line());
        }
        return Ok(());
    }

    let mut runner = ProcessRunner::new()
        .timeout(options.timeout.or(config.step_timeout))
        .cancel_token(cancel);
    if let Some(dir) = config.working_dir {
        runner = runner.working_dir(dir);
    }

    output.start_timer();
    let orchestrator = Orchestrator::new(runner, output, tools);
    orchestrator.run(&request).await?;

    orchestrator.sink().success("Done");
    Ok(())
}
