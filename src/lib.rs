//! # lsgo-rs: List the source files of Go packages
//!
//! Resolves package patterns (such as `./...`) into the files that belong to
//! them, then runs the paths through a lazy chain of stages before emitting a
//! duplicate-free list.
//!
//! ## Architecture
//!
//! ```text
//! patterns ─► Discovery ─► [exclude-cache] ─► [skip] ─► [keep] ─► [relative] ─► collect ─► lines
//!             (one load)   └──────────── lazy, pull-based, stop on first error ───────────┘
//! ```
//!
//! - **Discovery**: a [`PackageLoader`](core::discovery::PackageLoader) resolves
//!   patterns in one call; the resulting files are yielded one at a time.
//! - **Pipeline**: filter and rewrite stages wrap each other as iterators of
//!   `Result<FilePath>`. The first error ends every downstream stage.
//! - **Collector**: a first-seen ordered set; any error discards partial
//!   results.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lsgo_rs::core::discovery::{discover, GoListLoader};
//! use lsgo_rs::{ListPipeline, LsgoConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = LsgoConfig::default();
//!     config.filters.skip_pattern = "_test\\.go$".to_string();
//!
//!     let pipeline = ListPipeline::from_config(&config)?;
//!     let source = discover(&GoListLoader::new(), &config.load, &["./...".to_string()]);
//!     let files = pipeline.collect(source)?;
//!     files.write_lines(std::io::stdout().lock())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_debug_implementations)]
#![warn(unsafe_code)]

// Core listing engine modules
pub mod core {
    //! Configuration, discovery, and the listing pipeline.

    pub mod config;
    pub mod discovery;
    pub mod errors;
    pub mod pipeline;
}

// Re-export primary types for convenience
pub use core::config::LsgoConfig;
pub use core::errors::{LsgoError, Result};
pub use core::pipeline::{FilePath, ListPipeline, ResultSet, SequenceExt};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
