// ABOUTME: Application-wide error types for openfaas-deploy.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::deploy::DeployError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Whether the failure was already written to the output sink while the
    /// sequence ran, so the caller only needs to set the exit code.
    pub fn is_reported(&self) -> bool {
        matches!(self, Error::Deploy(e) if e.step().is_some())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
