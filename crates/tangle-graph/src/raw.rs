//! Label-keyed graph as produced by the extractor, before canonicalization.

use indexmap::{IndexMap, IndexSet};

use super::edge::Relation;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawEdge {
    pub target: String,
    pub relation: Relation,
}

/// Declared labels plus every reference found for them.
///
/// Edges may repeat and may point at labels that are never declared; the
/// canonicalizer sorts both out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGraph {
    nodes: IndexSet<String>,
    edges: IndexMap<String, IndexSet<RawEdge>>,
}

impl RawGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, label: impl Into<String>) {
        let label = label.into();
        self.edges.entry(label.clone()).or_default();
        self.nodes.insert(label);
    }

    pub fn add_edge(&mut self, from: &str, to: impl Into<String>, relation: Relation) {
        self.edges.entry(from.to_string()).or_default().insert(RawEdge {
            target: to.into(),
            relation,
        });
    }

    pub fn contains(&self, label: &str) -> bool {
        self.nodes.contains(label)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &IndexSet<RawEdge>)> {
        self.edges.iter().map(|(from, edges)| (from.as_str(), edges))
    }

    pub fn edges_from(&self, label: &str) -> impl Iterator<Item = &RawEdge> {
        self.edges.get(label).into_iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Copy `label` and its outgoing edges from `other`.
    pub fn import(&mut self, label: &str, other: &RawGraph) {
        self.add_node(label);
        for edge in other.edges_from(label) {
            self.add_edge(label, edge.target.clone(), edge.relation);
        }
    }

    /// Copy every node and edge of `other`.
    pub fn extend(&mut self, other: &RawGraph) {
        for label in other.nodes() {
            self.import(label, other);
        }
    }
}
