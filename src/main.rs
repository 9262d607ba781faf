// ABOUTME: Entry point for the openfaas-deploy CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::DeployOptions;
use openfaas_deploy::config::Config;
use openfaas_deploy::error::Result;
use openfaas_deploy::output::Output;
use std::env;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        if !e.is_reported() {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let output = Output::new(cli.output_mode());

    match cli.command {
        Commands::Init { force } => {
            let cwd = env::current_dir()?;
            commands::init(&cwd, force, &output)
        }
        Commands::Deploy(args) => {
            let cwd = env::current_dir()?;
            let config = match cli.config {
                Some(ref path) => Config::load(path)?,
                None => Config::discover(&cwd)?,
            };

            let request = args.request(&config.scale_zero_label)?;
            let options = DeployOptions {
                timeout: args.timeout,
                dry_run: args.dry_run,
            };

            let cancel = CancellationToken::new();
            tokio::spawn({
                let cancel = cancel.clone();
                async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        tracing::warn!("interrupt received, cancelling deployment");
                        cancel.cancel();
                    }
                }
            });

            commands::deploy(config, request, options, output, cancel).await
        }
    }
}
