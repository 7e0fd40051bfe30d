use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::Serialize;

use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::config::{CONFIG_FILE, ENV_PREFIX, TangleConfig};
use crate::error::{ConfigError, Result};

const FIELDS: [&str; 5] = ["format", "jsx", "max_iterations", "seed", "communities"];

/// Options given explicitly on the command line. Unset fields leave lower
/// layers alone.
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<OutputFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    jsx: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_iterations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    communities: Option<bool>,
}

impl From<&AnalyzeArgs> for CliOverrides {
    fn from(args: &AnalyzeArgs) -> Self {
        Self {
            format: args.format,
            jsx: args.jsx.then_some(true),
            max_iterations: args.max_iterations,
            seed: args.seed,
            communities: args.communities.then_some(true),
        }
    }
}

impl TangleConfig {
    /// Load configuration for `args`, looking for the default config file in
    /// `cwd`.
    /// Priority: CLI args > environment variables > config file > defaults
    pub fn load(args: &AnalyzeArgs, cwd: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match &args.config {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.clone()).into());
            }
            Some(path) => Some(path.clone()),
            None => {
                let default_path = cwd.join(CONFIG_FILE);
                default_path.exists().then_some(default_path)
            }
        };

        if let Some(path) = &config_file {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Toml::file(path));
        }

        // TANGLE_FORMAT, TANGLE_MAX_ITERATIONS, ...
        figment = figment.merge(Env::prefixed(ENV_PREFIX).only(&FIELDS));

        figment = figment.merge(Serialized::defaults(CliOverrides::from(args)));

        figment.extract().map_err(|e| {
            let field = if e.path.is_empty() {
                "configuration".to_string()
            } else {
                e.path.join(".")
            };
            ConfigError::InvalidValue {
                field,
                value: e.kind.to_string(),
                hint: format!(
                    "Check {CONFIG_FILE} and {ENV_PREFIX}* variables; format is one of suggestions, json, mermaid, force-graph"
                ),
            }
            .into()
        })
    }
}
