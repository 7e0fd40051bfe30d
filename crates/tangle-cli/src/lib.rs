//! Tangle CLI - refactor suggestions for single-file components.
//!
//! Reads one component file, extracts its declaration graph with
//! `tangle-extract` and prints what `tangle-graph` makes of it.
//!
//! - [`cli`] - clap definitions
//! - [`commands`] - command implementations
//! - [`config`] - `tangle.toml` / `TANGLE_*` / flag layering
//! - [`error`] - error types with actionable hints
//! - [`logger`] - tracing setup
//! - [`ui`] - terminal rendering

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
