use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::enums::OutputFormat;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze one component file
    ///
    /// `.vue` files are split into their blocks; `.tsx`/`.jsx` files are read as
    /// render-function or class components; other scripts as an options
    /// object or, failing that, as composition-style top-level code.
    Analyze(AnalyzeArgs),
}

/// Arguments for `tangle analyze`. Unset options fall back to `tangle.toml`,
/// then `TANGLE_*` environment variables, then built-in defaults.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Component file to analyze
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file (default: ./tangle.toml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Parse plain `.js`/`.ts` scripts with JSX enabled
    #[arg(long)]
    pub jsx: bool,

    /// Seed for community detection, for reproducible clustering
    #[arg(long)]
    pub seed: Option<u64>,

    /// Upper bound on label-propagation passes
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_iterations: Option<u64>,

    /// Include community detection in the output
    #[arg(long)]
    pub communities: bool,
}
