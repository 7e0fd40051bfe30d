//! Logging setup for the tangle CLI.
//!
//! Log events go to stderr so stdout carries only the requested output.
//!
//! # Example
//!
//! ```rust,no_run
//! use tangle_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("ready");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "tangle_cli=debug,tangle_extract=debug,tangle_graph=debug";
const QUIET_FILTER: &str = "tangle_cli=error,tangle_extract=error,tangle_graph=error";
const DEFAULT_FILTER: &str = "tangle_cli=info,tangle_extract=info,tangle_graph=info";

/// Initialize the tracing subscriber.
///
/// The level is picked in this order:
/// 1. `--verbose`: DEBUG for the tangle crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG`
/// 4. INFO for the tangle crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize the logger with a custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so only
    // filter selection is checked here.

    #[test]
    fn test_verbose_filter() {
        let filter = filter_for(true, false).to_string();
        assert!(filter.contains("tangle_extract=debug"));
        assert!(filter.contains("tangle_graph=debug"));
    }

    #[test]
    fn test_quiet_filter() {
        let filter = filter_for(false, true).to_string();
        assert!(filter.contains("tangle_cli=error"));
        assert!(!filter.contains("debug"));
    }
}
