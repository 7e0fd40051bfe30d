use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What `tangle analyze` prints.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One line per suggestion, grouped by severity colour
    #[default]
    #[value(name = "suggestions")]
    Suggestions,

    /// `{ graph, used, suggestions, communities? }` as pretty JSON
    #[value(name = "json")]
    Json,

    /// Mermaid flowchart of the declaration graph
    #[value(name = "mermaid")]
    Mermaid,

    /// Node and edge arrays for a force-directed graph view
    #[value(name = "force-graph")]
    ForceGraph,
}
