//! Configuration loading utilities for CLI commands

use crate::cli::Cli;
use crate::errors;
use plotreview_core::config::{CliConfigOverrides, LayeredConfig};
use plotreview_core::PlotError;
use std::path::{Path, PathBuf};

/// Configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "plotreview.toml";

/// Load layered configuration: defaults, file, environment, then flags
pub fn load_config(cli: &Cli) -> anyhow::Result<LayeredConfig> {
    let mut config = match config_file(cli.config.as_deref()) {
        Some(path) => LayeredConfig::with_defaults().load_from_file(&path).map_err(|e| match e {
            PlotError::ConfigInvalid { key, reason } => errors::invalid_config(&key, &reason),
            other => errors::invalid_config("file", &other.to_string()),
        })?,
        None => LayeredConfig::with_defaults(),
    }
    .load_from_env();

    config.update_from_cli(CliConfigOverrides {
        min_area_sq_meters: cli.min_area,
        min_vertices: cli.min_vertices,
        max_reason_len: cli.max_reason_len,
    });

    Ok(config)
}

/// The explicit `--config` path, or the default file when it exists
fn config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default.is_file() {
        tracing::debug!(path = %default.display(), "Using configuration file");
        Some(default)
    } else {
        None
    }
}
