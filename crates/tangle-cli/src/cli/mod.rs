//! Command-line interface definition for tangle.
//!
//! # Command Structure
//!
//! - `tangle analyze <file>` - Declaration graph and refactor suggestions for
//!   one component

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{AnalyzeArgs, Command};
pub use enums::*;

/// Tangle - refactor suggestions for UI components
#[derive(Parser, Debug)]
#[command(
    name = "tangle",
    version,
    about = "Refactor suggestions for single-file components",
    long_about = "Tangle builds the dependency graph between the declarations of one component\n\
                  (state, computed values, functions) and points out isolated groups, unused\n\
                  declarations, call cycles, call chains and articulation points."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows recovered parse failures, registry conflicts and per-step counts.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
