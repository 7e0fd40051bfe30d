//! Presentation projections of a graph.
//!
//! - [`to_mermaid`]: Mermaid flowchart text
//! - [`to_force_graph`]: node/edge arrays for force-directed network views

mod force_graph;
mod mermaid;

pub use force_graph::{
    ArrowHead, Arrows, ForceEdge, ForceGraph, ForceNode, NodeGroup, NodeShape, to_force_graph,
};
pub use mermaid::to_mermaid;
