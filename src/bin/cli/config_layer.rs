//! Configuration Layer Management
//!
//! Builds the run configuration from three layers: built-in defaults, an
//! optional YAML file, and command-line flags (highest priority).

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::cli::args::Cli;
use lsgo_rs::core::config::LsgoConfig;

/// File names picked up from the working directory when `--config` is absent.
const IMPLICIT_CONFIG_FILES: [&str; 2] = [".lsgo.yml", ".lsgo.yaml"];

/// Trait for merging configuration layers
pub trait ConfigMerge<T> {
    /// Merge another layer into this one, with the other taking priority
    fn merge_with(&mut self, other: T);
}

/// Command-line overrides. Flags only switch features on; strings override
/// only when given.
impl<'a> ConfigMerge<&'a Cli> for LsgoConfig {
    fn merge_with(&mut self, cli: &'a Cli) {
        if cli.include_tests {
            self.load.tests = true;
        }
        if let Some(dir) = &cli.dir {
            self.load.dir = Some(dir.clone());
        }
        if let Some(go_binary) = &cli.go_binary {
            self.load.go_binary = go_binary.clone();
        }
        if cli.exclude_cache {
            self.filters.exclude_cache = true;
        }
        if !cli.skip_pattern.is_empty() {
            self.filters.skip_pattern = cli.skip_pattern.clone();
        }
        if !cli.keep_pattern.is_empty() {
            self.filters.keep_pattern = cli.keep_pattern.clone();
        }
        if cli.use_relative_path {
            self.output.use_relative_path = true;
        }
    }
}

/// Locate the configuration file: explicit path first, then implicit names in
/// `search_dir`.
fn config_path(cli: &Cli, search_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = &cli.config {
        return Some(path.clone());
    }

    IMPLICIT_CONFIG_FILES
        .iter()
        .map(|name| search_dir.join(name))
        .find(|p| p.exists())
}

/// Build and validate the layered configuration, looking for implicit config
/// files in `search_dir`.
pub fn build_layered_config_in(cli: &Cli, search_dir: &Path) -> anyhow::Result<LsgoConfig> {
    let mut config = match config_path(cli, search_dir) {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            LsgoConfig::from_yaml_file(&path).with_context(|| {
                format!("Failed to load configuration from {}", path.display())
            })?
        }
        None => LsgoConfig::default(),
    };

    config.merge_with(cli);

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

/// Build the layered configuration from the current directory.
pub fn build_layered_config(cli: &Cli) -> anyhow::Result<LsgoConfig> {
    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    build_layered_config_in(cli, &cwd)
}
