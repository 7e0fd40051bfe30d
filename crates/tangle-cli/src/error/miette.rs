//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::FileNotFound(path) => miette::miette!(
            "File not found: {}\n\nHint: Pass a path to a .vue, .tsx, .jsx, .js or .ts file",
            path.display()
        ),
        CliError::Analysis(e) => miette::miette!("Analysis failed: {:#}", e),
        _ => miette::miette!("{}", err),
    }
}
