//! Package discovery.
//!
//! Patterns are resolved into [`PackageRecord`]s by a [`PackageLoader`] in a
//! single blocking call. [`discover`] turns the result into a path sequence for
//! the listing pipeline; [`list_files`] writes the raw file lists straight to
//! a writer with no filtering or deduplication.

mod go_list;
mod static_loader;

pub use go_list::GoListLoader;
pub use static_loader::StaticPackageLoader;

use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::vec;

use tracing::info;

pub use crate::core::config::LoadConfig;
use crate::core::config::DEFAULT_PATTERN;
use crate::core::errors::{LsgoError, Result};
use crate::core::pipeline::FilePath;

/// A resolved package and the files that belong to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageRecord {
    /// Package name (empty unless names were requested)
    pub name: String,
    /// Import path as reported by the collaborator
    pub import_path: String,
    /// Package directory, when known
    pub dir: Option<PathBuf>,
    /// File paths in collaborator order
    pub files: Vec<FilePath>,
}

impl PackageRecord {
    pub fn new(import_path: impl Into<String>, files: Vec<FilePath>) -> Self {
        Self {
            import_path: import_path.into(),
            files,
            ..Self::default()
        }
    }

    pub fn files(&self) -> &[FilePath] {
        &self.files
    }

    /// Write each file on its own line.
    pub fn write_files<W: Write>(&self, writer: &mut W) -> Result<()> {
        for file in &self.files {
            writeln!(writer, "{file}")
                .map_err(|e| LsgoError::io(format!("Failed to write '{file}'"), e))?;
        }
        Ok(())
    }
}

/// Resolves patterns into package records.
///
/// A load either returns every record or fails as a whole.
pub trait PackageLoader {
    fn load(&self, config: &LoadConfig, patterns: &[String]) -> Result<Vec<PackageRecord>>;
}

impl<L: PackageLoader + ?Sized> PackageLoader for &L {
    fn load(&self, config: &LoadConfig, patterns: &[String]) -> Result<Vec<PackageRecord>> {
        (**self).load(config, patterns)
    }
}

impl<L: PackageLoader + ?Sized> PackageLoader for Box<L> {
    fn load(&self, config: &LoadConfig, patterns: &[String]) -> Result<Vec<PackageRecord>> {
        (**self).load(config, patterns)
    }
}

/// Patterns to hand to the loader: the given ones, or `./...` when none are.
pub fn effective_patterns(patterns: &[String]) -> Vec<String> {
    if patterns.is_empty() {
        vec![DEFAULT_PATTERN.to_string()]
    } else {
        patterns.to_vec()
    }
}

/// The path sequence produced by one discovery call.
///
/// Either a single error item, or every file of every record in order.
#[derive(Debug)]
pub struct DiscoverySource {
    error: Option<LsgoError>,
    files: std::iter::Flatten<vec::IntoIter<Vec<FilePath>>>,
}

impl DiscoverySource {
    fn failed(err: LsgoError) -> Self {
        Self {
            error: Some(err),
            files: Vec::new().into_iter().flatten(),
        }
    }

    fn from_records(records: Vec<PackageRecord>) -> Self {
        let lists: Vec<Vec<FilePath>> = records.into_iter().map(|record| record.files).collect();
        Self {
            error: None,
            files: lists.into_iter().flatten(),
        }
    }
}

impl Iterator for DiscoverySource {
    type Item = Result<FilePath>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.error.take() {
            return Some(Err(err));
        }
        self.files.next().map(Ok)
    }
}

/// Load `patterns` once and expose the files as a sequence.
///
/// The loader runs immediately; only the yielding of its results is lazy.
pub fn discover<L>(loader: &L, config: &LoadConfig, patterns: &[String]) -> DiscoverySource
where
    L: PackageLoader + ?Sized,
{
    match loader.load(config, patterns) {
        Ok(records) => {
            let file_count: usize = records.iter().map(|r| r.files.len()).sum();
            info!(
                packages = records.len(),
                files = file_count,
                "Discovered packages"
            );
            DiscoverySource::from_records(records)
        }
        Err(err) => DiscoverySource::failed(err),
    }
}

/// Load `patterns` and write every package's files through a buffered writer.
pub fn list_files<L, W>(
    loader: &L,
    config: &LoadConfig,
    patterns: &[String],
    writer: W,
) -> Result<()>
where
    L: PackageLoader + ?Sized,
    W: Write,
{
    let records = loader.load(config, patterns)?;
    let mut out = BufWriter::new(writer);
    for record in &records {
        record.write_files(&mut out)?;
    }
    out.flush()
        .map_err(|e| LsgoError::io("Failed to flush output", e))
}

/// Patterns plus load options, with the defaults of the command-line tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lister {
    pub config: LoadConfig,
    pub patterns: Vec<String>,
}

impl Default for Lister {
    fn default() -> Self {
        Self {
            config: LoadConfig::empty().need_name().need_files().need_tests(),
            patterns: vec![DEFAULT_PATTERN.to_string()],
        }
    }
}

impl Lister {
    pub fn with_config(mut self, config: LoadConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_patterns<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn files<L: PackageLoader + ?Sized>(&self, loader: &L) -> DiscoverySource {
        discover(loader, &self.config, &self.patterns)
    }

    pub fn list_to<L, W>(&self, loader: &L, writer: W) -> Result<()>
    where
        L: PackageLoader + ?Sized,
        W: Write,
    {
        list_files(loader, &self.config, &self.patterns, writer)
    }
}
