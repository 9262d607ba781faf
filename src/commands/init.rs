// ABOUTME: Init command implementation.
// ABOUTME: Writes a template config file into the given directory.

use openfaas_deploy::config::{self, CONFIG_FILENAME};
use openfaas_deploy::error::Result;
use openfaas_deploy::output::{LogSink, Output};
use std::path::Path;

pub fn init(dir: &Path, force: bool, output: &Output) -> Result<()> {
    config::init_config(dir, force)?;
    output.success(&format!("Created {CONFIG_FILENAME}"));
    Ok(())
}
