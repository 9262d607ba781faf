// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates an openfaas-deploy.yml listing every setting at its default.

use std::path::Path;

use crate::error::{Error, Result};

use super::{CONFIG_FILENAME, Config};

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let yaml = generate_template_yaml(&Config::default());
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"faas_cli: {}
packager: {}
stack_file: {}
# Flag faas-cli receives the scale-to-zero label with.
# Older setups used "-lable"; current faas-cli spells it "--label".
label_flag: "{}"
scale_zero_label: {}
# Kill a step that runs longer than this (e.g. 10m). Unset means no limit.
# step_timeout: 10m
# working_dir: .
"#,
        config.faas_cli,
        config.packager,
        config.stack_file,
        config.label_flag,
        config.scale_zero_label,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_back_to_defaults() {
        let yaml = generate_template_yaml(&Config::default());
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config, Config::default());
    }
}
