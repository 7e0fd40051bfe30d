//! # tangle-graph
//!
//! Pure graph data structures for component declaration graphs.
//!
//! This crate holds the typed dependency graph that the extractor produces for a
//! single UI component, together with every analysis that runs on it. It does
//! no parsing and no I/O: feed it labels and relations, get back suggestions,
//! communities and presentation projections.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │   RawGraph   │   │ NodeRegistry │   (label-keyed extractor output)
//! └──────┬───────┘   └──────┬───────┘
//!        └────────┬─────────┘
//!                 ▼
//!          canonicalize()
//!                 │
//!                 ▼
//!        ┌─────────────────┐
//!        │      Graph      │   (typed nodes, deduped edges)
//!        └────────┬────────┘
//!      ┌──────────┼──────────────┐
//!      ▼          ▼              ▼
//!  suggest()  detect_communities()  export::{mermaid, force_graph}
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use indexmap::IndexSet;
//! use tangle_graph::{Graph, Node, NodeKind, Relation, suggest};
//!
//! # fn main() -> Result<(), tangle_graph::GraphError> {
//! let mut graph = Graph::new();
//! graph.add_node(Node::new("count", NodeKind::Variable));
//! graph.add_node(Node::new("increment", NodeKind::Function));
//! graph.add_edge("increment", "count", Relation::Write)?;
//!
//! let used: IndexSet<String> = ["count".to_string()].into_iter().collect();
//! let suggestions = suggest(&graph, &used);
//! assert!(suggestions.iter().any(|s| s.message.contains("increment")));
//! # Ok(())
//! # }
//! ```

pub mod adjacency;
pub mod canonical;
pub mod community;
pub mod edge;
pub mod export;
pub mod graph;
pub mod node;
pub mod raw;
pub mod registry;
pub mod suggest;

pub use adjacency::Adjacency;
pub use canonical::canonicalize;
pub use community::{
    Community, CommunityColor, CommunityOptions, CommunityResult, detect_communities,
    detect_communities_with_rng, generate_community_colors, generate_community_colors_rgba,
};
pub use edge::{Edge, EdgeRef, Relation};
pub use export::{ForceGraph, to_force_graph, to_mermaid};
pub use graph::Graph;
pub use node::{Node, NodeKind, SourceInfo};
pub use raw::{RawEdge, RawGraph};
pub use registry::{Declaration, NodeRegistry, RegistrationConflict};
pub use suggest::{Severity, Subject, Suggestion, suggest};

/// Labels referenced from outside the script (template, style, render output).
pub type UsageSet = indexmap::IndexSet<String>;

/// Error types for graph operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An edge endpoint does not name a node of the graph.
    #[error("unknown node: {label}")]
    UnknownNode {
        /// The missing label
        label: String,
    },

    /// A node label was declared twice in serialized input.
    #[error("duplicate node: {label}")]
    DuplicateNode {
        /// The repeated label
        label: String,
    },
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests;
