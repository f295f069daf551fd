//! Regular-expression predicates in skip and keep modes.

use regex::Regex;

use crate::core::errors::{LsgoError, Result};

use super::predicate::Predicate;

/// Whether a match removes or retains a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Drop the path when the pattern matches.
    Skip,
    /// Retain the path only when the pattern matches.
    Keep,
}

/// A compiled pattern. Compilation happens once, before any path is seen.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    /// Compile a non-empty pattern.
    ///
    /// An empty pattern is a caller error: it means "no stage", and should
    /// never reach the matcher. See [`PatternMatcher::optional`].
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(LsgoError::config("Refusing to build a matcher from an empty pattern"));
        }

        let regex = Regex::new(pattern).map_err(|err| {
            LsgoError::config(format!("Invalid pattern '{pattern}': {err}"))
        })?;
        Ok(Self { regex })
    }

    /// Compile the pattern if it is non-empty; `None` means no stage is added.
    pub fn optional(pattern: &str) -> Result<Option<Self>> {
        if pattern.is_empty() {
            return Ok(None);
        }
        Self::new(pattern).map(Some)
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn into_filter(self, mode: MatchMode) -> MatchFilter {
        MatchFilter {
            matcher: self,
            mode,
        }
    }

    pub fn skip(self) -> MatchFilter {
        self.into_filter(MatchMode::Skip)
    }

    pub fn keep(self) -> MatchFilter {
        self.into_filter(MatchMode::Keep)
    }
}

/// A [`PatternMatcher`] bound to a [`MatchMode`].
#[derive(Debug, Clone)]
pub struct MatchFilter {
    matcher: PatternMatcher,
    mode: MatchMode,
}

impl MatchFilter {
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }
}

impl Predicate for MatchFilter {
    fn keep(&self, path: &str) -> bool {
        let matched = self.matcher.is_match(path);
        match self.mode {
            MatchMode::Skip => !matched,
            MatchMode::Keep => matched,
        }
    }
}
