//! Per-path rewriting, applied after every filter stage.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::core::errors::{LsgoError, Result};

use super::FilePath;

/// Rewrites a path, failing independently for each item.
pub trait PathRewriter {
    fn rewrite(&self, path: &str) -> Result<FilePath>;
}

impl<F> PathRewriter for F
where
    F: Fn(&str) -> Result<FilePath>,
{
    fn rewrite(&self, path: &str) -> Result<FilePath> {
        self(path)
    }
}

/// Returns every path unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl PathRewriter for Identity {
    fn rewrite(&self, path: &str) -> Result<FilePath> {
        Ok(path.to_string())
    }
}

/// Expresses paths relative to a base directory.
///
/// The computation is purely lexical: neither the base nor the path has to
/// exist, and symlinks are not resolved. A path outside the base is expressed
/// with leading `..` components. Rewriting fails when exactly one of base and
/// path is absolute, or when the base itself climbs above its starting point
/// in a way the path cannot follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeTo {
    base: PathBuf,
}

impl RelativeTo {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Relative to the process working directory.
    pub fn current_dir() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| LsgoError::io("Failed to determine the current directory", e))?;
        Ok(Self::new(cwd))
    }

    /// Relative to `base`, anchoring a relative base at the working directory
    /// so it can be compared with the absolute paths discovery yields.
    pub fn resolved(base: impl Into<PathBuf>) -> Result<Self> {
        let base = base.into();
        if base.is_absolute() {
            return Ok(Self::new(base));
        }
        let cwd = Self::current_dir()?;
        Ok(Self::new(cwd.base.join(base)))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn fail(&self, path: &str, message: impl Into<String>) -> LsgoError {
        LsgoError::rewrite_with_base(path, self.base.display().to_string(), message)
    }
}

impl PathRewriter for RelativeTo {
    fn rewrite(&self, path: &str) -> Result<FilePath> {
        let (base_absolute, base) = lexical_components(&self.base);
        let (target_absolute, target) = lexical_components(Path::new(path));

        if base_absolute != target_absolute {
            return Err(self.fail(path, "cannot mix absolute and relative paths"));
        }

        let common = base
            .iter()
            .zip(target.iter())
            .take_while(|(b, t)| b == t)
            .count();

        if base[common..].iter().any(|c| *c == OsStr::new("..")) {
            return Err(self.fail(path, "base directory escapes above the path"));
        }

        let mut relative = PathBuf::new();
        for _ in common..base.len() {
            relative.push("..");
        }
        for component in &target[common..] {
            relative.push(component);
        }

        if relative.as_os_str().is_empty() {
            return Ok(".".to_string());
        }

        relative
            .into_os_string()
            .into_string()
            .map_err(|_| self.fail(path, "relative path is not valid UTF-8"))
    }
}

/// Split a path into cleaned components, resolving `.` and `..` lexically.
/// Leading `..` survive only on relative paths; above the root they vanish.
fn lexical_components(path: &Path) -> (bool, Vec<&OsStr>) {
    let absolute = path.has_root();
    let mut parts: Vec<&OsStr> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(last) if *last != OsStr::new("..") => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(component.as_os_str()),
            },
            Component::Normal(name) => parts.push(name),
        }
    }

    (absolute, parts)
}
