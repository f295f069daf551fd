//! Listing Pipeline Module
//!
//! Discovered file paths flow through a chain of lazy stages before being
//! collected into a duplicate-free set:
//!
//! 1. **Filters**: cache exclusion, skip pattern, keep pattern (any subset, in
//!    that order; filters commute with each other)
//! 2. **Rewrite**: at most one path rewriter, always after every filter
//! 3. **Collect**: deduplicate, surfacing the first error
//!
//! ## Usage
//!
//! ```ignore
//! use lsgo_rs::core::pipeline::{ListPipeline, SequenceExt};
//!
//! let pipeline = ListPipeline::from_config(&config)?;
//! let files = pipeline.collect(source)?;
//! files.write_lines(std::io::stdout().lock())?;
//! ```

pub use collector::{collect_unique, ResultSet};
pub use matcher::{MatchFilter, MatchMode, PatternMatcher};
pub use predicate::{ExcludeContaining, KeepAll, Predicate};
pub use rewriter::{Identity, PathRewriter, RelativeTo};
pub use sequence::{BoxedSequence, Filtered, Rewritten, SequenceExt, UntilError};

mod collector;
mod matcher;
mod predicate;
mod rewriter;
mod sequence;

use tracing::debug;

use crate::core::config::LsgoConfig;
use crate::core::errors::Result;

/// An opaque file path; equality is exact string equality.
pub type FilePath = String;

/// The stage chain for one listing run.
///
/// Patterns are compiled and the rewrite base resolved when the pipeline is
/// built, so configuration errors surface before any path is processed.
#[derive(Debug, Clone, Default)]
pub struct ListPipeline {
    cache_filter: Option<ExcludeContaining>,
    skip: Option<PatternMatcher>,
    keep: Option<PatternMatcher>,
    rewriter: Option<RelativeTo>,
}

impl ListPipeline {
    /// A pipeline with no stages: collection only.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LsgoConfig) -> Result<Self> {
        let filters = &config.filters;
        let mut pipeline = Self::new();

        if filters.exclude_cache {
            pipeline = pipeline.with_cache_filter(ExcludeContaining::new(&filters.cache_marker));
        }
        if let Some(matcher) = PatternMatcher::optional(&filters.skip_pattern)? {
            pipeline = pipeline.with_skip(matcher);
        }
        if let Some(matcher) = PatternMatcher::optional(&filters.keep_pattern)? {
            pipeline = pipeline.with_keep(matcher);
        }
        if config.output.use_relative_path {
            let rewriter = match &config.output.base_dir {
                Some(base) => RelativeTo::resolved(base)?,
                None => RelativeTo::current_dir()?,
            };
            pipeline = pipeline.with_rewriter(rewriter);
        }

        debug!(stages = ?pipeline.stage_names(), "Built listing pipeline");
        Ok(pipeline)
    }

    pub fn with_cache_filter(mut self, filter: ExcludeContaining) -> Self {
        self.cache_filter = Some(filter);
        self
    }

    pub fn with_skip(mut self, matcher: PatternMatcher) -> Self {
        self.skip = Some(matcher);
        self
    }

    pub fn with_keep(mut self, matcher: PatternMatcher) -> Self {
        self.keep = Some(matcher);
        self
    }

    pub fn with_rewriter(mut self, rewriter: RelativeTo) -> Self {
        self.rewriter = Some(rewriter);
        self
    }

    /// Names of the active stages, in application order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.cache_filter.is_some() {
            names.push("exclude-cache");
        }
        if self.skip.is_some() {
            names.push("skip-pattern");
        }
        if self.keep.is_some() {
            names.push("keep-pattern");
        }
        if self.rewriter.is_some() {
            names.push("relative-path");
        }
        names
    }

    /// Wrap `source` in the configured stages. Nothing is pulled until the
    /// returned sequence is, and nothing follows the first error even when
    /// `source` keeps yielding.
    pub fn apply<'a, S>(&self, source: S) -> BoxedSequence<'a>
    where
        S: Iterator<Item = Result<FilePath>> + 'a,
    {
        let mut sequence = source.until_error().boxed();

        if let Some(filter) = &self.cache_filter {
            sequence = sequence.filter_paths(filter.clone()).boxed();
        }
        if let Some(matcher) = &self.skip {
            sequence = sequence.skip_matching(matcher.clone()).boxed();
        }
        if let Some(matcher) = &self.keep {
            sequence = sequence.keep_matching(matcher.clone()).boxed();
        }
        if let Some(rewriter) = &self.rewriter {
            sequence = sequence.rewrite_paths(rewriter.clone()).boxed();
        }

        sequence
    }

    /// Apply the stages and collect the unique results.
    pub fn collect<'a, S>(&self, source: S) -> Result<ResultSet>
    where
        S: Iterator<Item = Result<FilePath>> + 'a,
    {
        let files = self.apply(source).collect_unique()?;
        debug!(count = files.len(), "Collected unique paths");
        Ok(files)
    }
}
