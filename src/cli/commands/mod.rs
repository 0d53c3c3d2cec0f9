pub mod extract;
pub mod init;
pub mod tags;

use std::env;

use anyhow::{Context, Result};
use tracing::debug;

use super::args::CommonArgs;
use crate::{
    config::{Config, load_config, load_config_file},
    core::tags::TagRegistry,
    rules::registry_from_config,
};

/// Load the config named by `--config`, or the nearest one above the
/// working directory, or defaults.
pub fn load_settings(common: &CommonArgs) -> Result<Config> {
    let loaded = match &common.config {
        Some(path) => load_config_file(path)?,
        None => load_config(&env::current_dir()?)?,
    };
    match &loaded.path {
        Some(path) => debug!(path = %path.display(), "loaded config"),
        None => debug!("no config file found, using defaults"),
    }
    Ok(loaded.config)
}

pub fn build_registry(config: &Config) -> Result<TagRegistry> {
    registry_from_config(config).context("Failed to build tag registry")
}
