use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// Command-line values that take precedence over the configuration file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub logs_dir: Option<PathBuf>,
    pub html_dir: Option<PathBuf>,
    pub bind: Option<String>,
    pub log_level: Option<String>,
}

/// Apply CLI overrides to a configuration
pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(logs_dir) = &overrides.logs_dir {
        config.logs_dir = logs_dir.clone();
    }
    if let Some(html_dir) = &overrides.html_dir {
        config.html_dir = html_dir.clone();
    }
    if let Some(bind) = &overrides.bind {
        config.bind = bind.clone();
    }
    if let Some(log_level) = &overrides.log_level {
        config.log_level = log_level.clone();
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}

/// Configuration from an optional file, with CLI overrides applied
pub fn resolve_config(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    apply_overrides(&mut config, overrides)?;
    Ok(config)
}
