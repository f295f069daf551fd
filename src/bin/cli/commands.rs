//! Command execution for the lsgo binary.

use std::io::{self, Write};

use anyhow::Context;
use tracing::{debug, info};

use lsgo_rs::core::discovery::{discover, effective_patterns, GoListLoader, PackageLoader};
use lsgo_rs::{ListPipeline, LsgoConfig};

use crate::cli::args::Cli;
use crate::cli::config_layer::build_layered_config;

/// Run the command described by `cli`, writing results to stdout.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.print_default_config {
        return print_default_config(io::stdout().lock());
    }

    let config = build_layered_config(&cli)?;
    let patterns = effective_patterns(&cli.patterns);
    list_command(&config, &patterns, &GoListLoader::new(), io::stdout().lock())
}

/// Discover, filter, deduplicate, and write the file list.
pub fn list_command<L, W>(
    config: &LsgoConfig,
    patterns: &[String],
    loader: &L,
    writer: W,
) -> anyhow::Result<()>
where
    L: PackageLoader + ?Sized,
    W: Write,
{
    let pipeline = ListPipeline::from_config(config).context("Failed to build listing pipeline")?;
    debug!(?patterns, "Listing files");

    let source = discover(loader, &config.load, patterns);
    let files = pipeline.collect(source)?;
    info!("Listing {} unique files", files.len());

    files
        .write_lines(writer)
        .context("Failed to write file list")?;
    Ok(())
}

/// Print the default configuration in YAML form.
pub fn print_default_config<W: Write>(mut writer: W) -> anyhow::Result<()> {
    let yaml = LsgoConfig::default().to_yaml_string()?;
    writer
        .write_all(yaml.as_bytes())
        .and_then(|()| writer.flush())
        .context("Failed to write default configuration")?;
    Ok(())
}
