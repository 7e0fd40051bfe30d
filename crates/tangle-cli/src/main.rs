//! Tangle CLI entry point.

use clap::Parser;
use miette::Result;
use tangle_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    let color = ui::should_use_color(args.no_color);

    let result = match args.command {
        cli::Command::Analyze(analyze_args) => commands::analyze_execute(analyze_args, color),
    };

    result.map_err(error::cli_error_to_miette)
}
