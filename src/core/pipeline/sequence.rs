//! Lazy, pull-based path sequences with an embedded error channel.
//!
//! A sequence is any iterator of `Result<FilePath>`. Every adapter here obeys
//! the same contract:
//!
//! - an `Err` pulled from upstream is forwarded as-is and the adapter yields
//!   nothing afterwards, even if upstream still has items;
//! - the adapter pulls from upstream only when its consumer pulls from it, and
//!   holds at most one item at a time;
//! - stage logic (predicate or rewriter) never sees an item that arrived as an
//!   error.
//!
//! Dropping a sequence cancels it: there is no background work to stop.

use super::collector::{collect_unique, ResultSet};
use super::matcher::{MatchFilter, PatternMatcher};
use super::predicate::Predicate;
use super::rewriter::PathRewriter;
use super::FilePath;
use crate::core::errors::Result;

/// A type-erased sequence, used when the stage chain is decided at runtime.
pub type BoxedSequence<'a> = Box<dyn Iterator<Item = Result<FilePath>> + 'a>;

/// Stops after the first error. Wraps sources that do not guarantee it.
#[derive(Debug)]
pub struct UntilError<S> {
    upstream: S,
    finished: bool,
}

impl<S> Iterator for UntilError<S>
where
    S: Iterator<Item = Result<FilePath>>,
{
    type Item = Result<FilePath>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = self.upstream.next();
        if matches!(item, None | Some(Err(_))) {
            self.finished = true;
        }
        item
    }
}

/// Yields the upstream paths a predicate keeps.
#[derive(Debug)]
pub struct Filtered<S, P> {
    upstream: S,
    predicate: P,
    finished: bool,
}

impl<S, P> Iterator for Filtered<S, P>
where
    S: Iterator<Item = Result<FilePath>>,
    P: Predicate,
{
    type Item = Result<FilePath>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.upstream.next() {
                None => {
                    self.finished = true;
                    return None;
                }
                Some(Err(err)) => {
                    self.finished = true;
                    return Some(Err(err));
                }
                Some(Ok(path)) => {
                    if self.predicate.keep(&path) {
                        return Some(Ok(path));
                    }
                }
            }
        }
    }
}

/// Yields each upstream path passed through a rewriter.
///
/// A rewrite failure becomes the terminal error of this sequence.
#[derive(Debug)]
pub struct Rewritten<S, R> {
    upstream: S,
    rewriter: R,
    finished: bool,
}

impl<S, R> Iterator for Rewritten<S, R>
where
    S: Iterator<Item = Result<FilePath>>,
    R: PathRewriter,
{
    type Item = Result<FilePath>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let rewritten = match self.upstream.next() {
            None => None,
            Some(Err(err)) => Some(Err(err)),
            Some(Ok(path)) => Some(self.rewriter.rewrite(&path)),
        };

        if matches!(rewritten, None | Some(Err(_))) {
            self.finished = true;
        }
        rewritten
    }
}

/// Stage composition for path sequences.
pub trait SequenceExt: Iterator<Item = Result<FilePath>> + Sized {
    /// Guarantee nothing follows the first error.
    fn until_error(self) -> UntilError<Self> {
        UntilError {
            upstream: self,
            finished: false,
        }
    }

    /// Keep the paths `predicate` accepts.
    fn filter_paths<P: Predicate>(self, predicate: P) -> Filtered<Self, P> {
        Filtered {
            upstream: self,
            predicate,
            finished: false,
        }
    }

    /// Keep the paths a closure accepts.
    fn filter_with<F>(self, keep: F) -> Filtered<Self, F>
    where
        F: Fn(&str) -> bool,
    {
        self.filter_paths(keep)
    }

    /// Drop the paths matching `matcher`.
    fn skip_matching(self, matcher: PatternMatcher) -> Filtered<Self, MatchFilter> {
        self.filter_paths(matcher.skip())
    }

    /// Keep only the paths matching `matcher`.
    fn keep_matching(self, matcher: PatternMatcher) -> Filtered<Self, MatchFilter> {
        self.filter_paths(matcher.keep())
    }

    /// Rewrite every path; the first failure ends the sequence.
    fn rewrite_paths<R: PathRewriter>(self, rewriter: R) -> Rewritten<Self, R> {
        Rewritten {
            upstream: self,
            rewriter,
            finished: false,
        }
    }

    /// Erase the concrete adapter type.
    fn boxed<'a>(self) -> BoxedSequence<'a>
    where
        Self: 'a,
    {
        Box::new(self)
    }

    /// Drain into a duplicate-free set, or return the first error.
    fn collect_unique(self) -> Result<ResultSet> {
        collect_unique(self)
    }
}

impl<S> SequenceExt for S where S: Iterator<Item = Result<FilePath>> {}
