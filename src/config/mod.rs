// ABOUTME: Configuration types and parsing for openfaas-deploy.yml.
// ABOUTME: Every field is optional; a missing file means the stock faas-cli setup.

mod init;

pub use init::init_config;

use crate::deploy::{
    DEFAULT_FAAS_CLI, DEFAULT_LABEL_FLAG, DEFAULT_PACKAGER, DEFAULT_STACK_FILE, SCALE_ZERO_LABEL,
    Tools,
};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "openfaas-deploy.yml";
pub const CONFIG_FILENAME_ALT: &str = "openfaas-deploy.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".openfaas/deploy.yml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Deployment CLI used for push, deploy, and list.
    #[serde(default = "default_faas_cli")]
    pub faas_cli: String,

    /// Tool that builds function images before a push.
    #[serde(default = "default_packager")]
    pub packager: String,

    /// Stack file passed to faas-cli with `-f`.
    #[serde(default = "default_stack_file")]
    pub stack_file: String,

    /// Flag used to pass the scale-to-zero label to `faas-cli deploy`.
    #[serde(default = "default_label_flag")]
    pub label_flag: String,

    #[serde(default = "default_scale_zero_label")]
    pub scale_zero_label: String,

    /// Kill any step that runs longer than this.
    #[serde(default, with = "humantime_serde")]
    pub step_timeout: Option<Duration>,

    /// Directory the tools run in; defaults to the current directory.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

fn default_faas_cli() -> String {
    DEFAULT_FAAS_CLI.to_string()
}

fn default_packager() -> String {
    DEFAULT_PACKAGER.to_string()
}

fn default_stack_file() -> String {
    DEFAULT_STACK_FILE.to_string()
}

fn default_label_flag() -> String {
    DEFAULT_LABEL_FLAG.to_string()
}

fn default_scale_zero_label() -> String {
    SCALE_ZERO_LABEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            faas_cli: default_faas_cli(),
            packager: default_packager(),
            stack_file: default_stack_file(),
            label_flag: default_label_flag(),
            scale_zero_label: default_scale_zero_label(),
            step_timeout: None,
            working_dir: None,
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file deserializes as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the first config file found in `dir`, or defaults if there is none.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::load(path);
            }
        }

        tracing::debug!(dir = %dir.display(), "no config file found, using defaults");
        Ok(Config::default())
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("faas_cli", &self.faas_cli),
            ("packager", &self.packager),
            ("stack_file", &self.stack_file),
            ("label_flag", &self.label_flag),
            ("scale_zero_label", &self.scale_zero_label),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("{field} cannot be empty")));
            }
        }

        if self.step_timeout == Some(Duration::ZERO) {
            return Err(Error::InvalidConfig(
                "step_timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Programs and fixed arguments for building steps.
    pub fn tools(&self) -> Tools {
        Tools {
            faas_cli: self.faas_cli.clone(),
            packager: self.packager.clone(),
            stack_file: self.stack_file.clone(),
            label_flag: self.label_flag.clone(),
            scale_zero_label: self.scale_zero_label.clone(),
        }
    }
}
