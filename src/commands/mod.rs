// ABOUTME: Command module aggregator for the openfaas-deploy CLI.
// ABOUTME: Re-exports deploy and init command handlers.

mod deploy;
mod init;

pub use deploy::{DeployOptions, deploy};
pub use init::init;
