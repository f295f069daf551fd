//! Keep/skip decisions over file paths.

use crate::core::config::DEFAULT_CACHE_MARKER;

/// A pure keep/skip decision for a single path.
///
/// Implementations must be total (any string, including the empty string, is a
/// valid input) and free of side effects visible to the pipeline.
pub trait Predicate {
    /// Returns `true` when the path should stay in the sequence.
    fn keep(&self, path: &str) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&str) -> bool,
{
    fn keep(&self, path: &str) -> bool {
        self(path)
    }
}

/// Keeps every path. The default when no filter is requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAll;

impl Predicate for KeepAll {
    fn keep(&self, _path: &str) -> bool {
        true
    }
}

/// Drops any path containing a fixed substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludeContaining {
    marker: String,
}

impl ExcludeContaining {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Excludes files under a user cache directory (`Library/Caches`).
    pub fn cache() -> Self {
        Self::new(DEFAULT_CACHE_MARKER)
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl Predicate for ExcludeContaining {
    fn keep(&self, path: &str) -> bool {
        !path.contains(&self.marker)
    }
}
