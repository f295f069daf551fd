//! CLI Argument Structures
//!
//! Flag definitions for the lsgo binary.

use clap::Parser;
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// List the source files of Go packages
#[derive(Parser, Debug, Default)]
#[command(name = "lsgo")]
#[command(version = VERSION)]
#[command(about = "List the source files belonging to Go package patterns")]
#[command(long_about = "
Resolve package patterns into their source files and print one unique path
per line. Paths can be filtered by regular expression and rewritten relative
to the current directory.

Common Usage:

  # Every file of every package under the current module
  lsgo

  # Include test files, but drop anything in the build cache
  lsgo --include-tests --exclude-cache ./...

  # Only non-test files, relative to the current directory
  lsgo --skip-pattern '_test\\.go$' --use-relative-path ./cmd/...
")]
pub struct Cli {
    /// Package patterns to resolve [default: ./...]
    #[arg(value_name = "PATTERNS")]
    pub patterns: Vec<String>,

    /// Print paths relative to the current working directory
    #[arg(long)]
    pub use_relative_path: bool,

    /// Include test files
    #[arg(long)]
    pub include_tests: bool,

    /// Drop paths inside a cache directory (containing "Library/Caches")
    #[arg(long)]
    pub exclude_cache: bool,

    /// Drop paths matching this regular expression
    #[arg(long, value_name = "REGEX", default_value = "")]
    pub skip_pattern: String,

    /// Keep only paths matching this regular expression
    #[arg(long, value_name = "REGEX", default_value = "")]
    pub keep_pattern: String,

    /// Configuration file (defaults to .lsgo.yml or .lsgo.yaml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory to resolve patterns from
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Go toolchain binary used for discovery
    #[arg(long, value_name = "PATH")]
    pub go_binary: Option<String>,

    /// Print the default configuration as YAML and exit
    #[arg(long)]
    pub print_default_config: bool,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
