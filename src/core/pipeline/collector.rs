//! Deduplicating collection and line-oriented output.

use std::io::{BufWriter, Write};

use indexmap::IndexSet;

use crate::core::errors::{LsgoError, Result};

use super::FilePath;

/// Distinct paths in first-seen order.
///
/// Equality ignores order: two sets holding the same paths are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    paths: IndexSet<FilePath>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the path was not already present.
    pub fn insert(&mut self, path: FilePath) -> bool {
        self.paths.insert(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.paths.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<FilePath> {
        self.paths.into_iter().collect()
    }

    /// Write one path per line through a buffered writer.
    ///
    /// The buffer is flushed before returning `Ok`; on error whatever was
    /// already flushed stays written.
    pub fn write_lines<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = BufWriter::new(writer);
        for path in &self.paths {
            writeln!(out, "{path}")
                .map_err(|e| LsgoError::io(format!("Failed to write '{path}'"), e))?;
        }
        out.flush()
            .map_err(|e| LsgoError::io("Failed to flush output", e))
    }
}

impl FromIterator<FilePath> for ResultSet {
    fn from_iter<I: IntoIterator<Item = FilePath>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ResultSet {
    type Item = FilePath;
    type IntoIter = indexmap::set::IntoIter<FilePath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

/// Drain a sequence into a [`ResultSet`].
///
/// Stops at the first error and returns it; partial results are discarded.
pub fn collect_unique<S>(sequence: S) -> Result<ResultSet>
where
    S: IntoIterator<Item = Result<FilePath>>,
{
    let mut set = ResultSet::new();
    for item in sequence {
        set.insert(item?);
    }
    Ok(set)
}
