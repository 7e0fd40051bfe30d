//! Layered configuration for `tangle analyze`.
//!
//! Merges settings from CLI args, environment variables and a TOML file.
//! Priority: CLI > Environment > File > Defaults

mod defaults;
mod loading;

use serde::{Deserialize, Serialize};
use tangle_graph::CommunityOptions;

use crate::cli::OutputFormat;

pub use defaults::*;

/// Name of the config file picked up from the working directory.
pub const CONFIG_FILE: &str = "tangle.toml";

/// Prefix of the environment variables read into the config.
pub const ENV_PREFIX: &str = "TANGLE_";

/// Tangle configuration - loaded from tangle.toml, `TANGLE_*` and CLI args.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TangleConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Enable JSX when parsing plain `.js`/`.ts` scripts
    #[serde(default)]
    pub jsx: bool,

    /// Upper bound on label-propagation passes
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,

    /// Seed for community detection; random when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Run community detection and include it in the output
    #[serde(default)]
    pub communities: bool,
}

impl Default for TangleConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            jsx: false,
            max_iterations: default_max_iterations(),
            seed: None,
            communities: false,
        }
    }
}

impl TangleConfig {
    pub fn community_options(&self) -> CommunityOptions {
        CommunityOptions {
            max_iterations: usize::try_from(self.max_iterations).unwrap_or(usize::MAX),
        }
    }
}
