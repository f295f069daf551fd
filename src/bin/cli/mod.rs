//! CLI Module Organization
//!
//! - args: flag definitions
//! - commands: command execution
//! - config_layer: configuration layering (defaults, file, flags)

pub mod args;
pub mod commands;
pub mod config_layer;

pub use args::*;
pub use commands::*;
