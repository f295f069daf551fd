//! Configuration types for lsgo-rs.
//!
//! A single [`LsgoConfig`] is built once at startup (defaults, then an optional
//! YAML file, then command-line overrides) and handed by reference to the
//! discovery source and the listing pipeline. Nothing here is process-global.

pub mod validation;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{LsgoError, Result};

pub use validation::{validate_non_empty, validate_pattern};

/// Pattern used when no package patterns are supplied.
pub const DEFAULT_PATTERN: &str = "./...";

/// Path fragment identifying files that live in a user cache directory.
pub const DEFAULT_CACHE_MARKER: &str = "Library/Caches";

/// Top-level configuration for a listing run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LsgoConfig {
    /// How packages are loaded by the discovery collaborator
    #[serde(default)]
    pub load: LoadConfig,

    /// Filter stages applied to the discovered paths
    #[serde(default)]
    pub filters: FilterConfig,

    /// Output shaping
    #[serde(default)]
    pub output: OutputConfig,
}

impl LsgoConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LsgoError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(Into::into)
    }

    /// Render the configuration as YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(Into::into)
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<()> {
        self.load.validate()?;
        self.filters.validate()?;
        Ok(())
    }
}

/// Options passed to the package discovery collaborator.
///
/// `need_name`, `need_files` and `tests` together form the load mode. The
/// builder methods return an updated copy so a base configuration can be
/// specialised without mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Populate package names
    #[serde(default = "LoadConfig::default_true")]
    pub need_name: bool,

    /// Populate package file lists
    #[serde(default = "LoadConfig::default_true")]
    pub need_files: bool,

    /// Include test files and test packages
    #[serde(default)]
    pub tests: bool,

    /// Working directory for discovery (current directory when unset)
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Go toolchain binary used to resolve patterns
    #[serde(default = "LoadConfig::default_go_binary")]
    pub go_binary: String,

    /// Extra build flags forwarded to the collaborator
    #[serde(default)]
    pub build_flags: Vec<String>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            need_name: true,
            need_files: true,
            tests: false,
            dir: None,
            go_binary: Self::default_go_binary(),
            build_flags: Vec::new(),
        }
    }
}

impl LoadConfig {
    const fn default_true() -> bool {
        true
    }

    fn default_go_binary() -> String {
        "go".to_string()
    }

    /// A configuration requesting nothing; combine with the `need_*` builders.
    pub fn empty() -> Self {
        Self {
            need_name: false,
            need_files: false,
            ..Self::default()
        }
    }

    /// Request package names
    pub fn need_name(mut self) -> Self {
        self.need_name = true;
        self
    }

    /// Request package file lists
    pub fn need_files(mut self) -> Self {
        self.need_files = true;
        self
    }

    /// Request test files
    pub fn need_tests(mut self) -> Self {
        self.tests = true;
        self
    }

    /// Run discovery from the given directory
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Use a specific Go toolchain binary
    pub fn with_go_binary(mut self, go_binary: impl Into<String>) -> Self {
        self.go_binary = go_binary.into();
        self
    }

    /// Validate load options
    pub fn validate(&self) -> Result<()> {
        validate_non_empty(&self.go_binary, "load.go_binary")?;
        if let Some(flag) = self.build_flags.iter().find(|flag| flag.trim().is_empty()) {
            return Err(LsgoError::validation_field(
                format!("build flag '{flag}' must not be blank"),
                "load.build_flags",
            ));
        }
        Ok(())
    }
}

/// Filter stages applied before any rewriting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Drop paths containing the cache marker
    #[serde(default)]
    pub exclude_cache: bool,

    /// Substring identifying cache paths
    #[serde(default = "FilterConfig::default_cache_marker")]
    pub cache_marker: String,

    /// Drop paths matching this regular expression (empty means no stage)
    #[serde(default)]
    pub skip_pattern: String,

    /// Retain only paths matching this regular expression (empty means no stage)
    #[serde(default)]
    pub keep_pattern: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            exclude_cache: false,
            cache_marker: Self::default_cache_marker(),
            skip_pattern: String::new(),
            keep_pattern: String::new(),
        }
    }
}

impl FilterConfig {
    fn default_cache_marker() -> String {
        DEFAULT_CACHE_MARKER.to_string()
    }

    /// Validate filter options, compiling any patterns to catch errors early
    pub fn validate(&self) -> Result<()> {
        if self.exclude_cache {
            validate_non_empty(&self.cache_marker, "filters.cache_marker")?;
        }
        validate_pattern(&self.skip_pattern, "filters.skip_pattern")?;
        validate_pattern(&self.keep_pattern, "filters.keep_pattern")?;
        Ok(())
    }
}

/// Output shaping options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Rewrite each path relative to `base_dir`
    #[serde(default)]
    pub use_relative_path: bool,

    /// Base for relative paths; the current directory when unset
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
}
