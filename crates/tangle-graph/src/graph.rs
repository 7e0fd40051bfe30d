//! The typed declaration graph.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::adjacency::Adjacency;
use super::edge::{Edge, EdgeRef, Relation};
use super::node::Node;
use super::{GraphError, Result};

/// Typed dependency graph of one component.
///
/// Nodes are keyed by label and kept in insertion order. Every node owns an
/// adjacency entry; each (from, to) pair carries exactly one relation, chosen
/// by [`Relation::merge`] when the same pair is added twice. Edge targets are
/// always nodes of the graph.
///
/// Equality ignores insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SerializedGraph", try_from = "SerializedGraph")]
pub struct Graph {
    nodes: IndexMap<String, Node>,
    adjacency: IndexMap<String, IndexMap<String, Relation>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. The first node registered under a label wins; returns
    /// `false` when the label was already present.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.nodes.contains_key(&node.label) {
            return false;
        }
        self.adjacency.insert(node.label.clone(), IndexMap::new());
        self.nodes.insert(node.label.clone(), node);
        true
    }

    /// Insert or strengthen the edge `from → to`.
    pub fn add_edge(&mut self, from: &str, to: &str, relation: Relation) -> Result<()> {
        for label in [from, to] {
            if !self.nodes.contains_key(label) {
                return Err(GraphError::UnknownNode {
                    label: label.to_string(),
                });
            }
        }
        self.link(from, to, relation);
        Ok(())
    }

    /// Insert an edge whose endpoints are known to exist.
    pub(crate) fn link(&mut self, from: &str, to: &str, relation: Relation) {
        let targets = self.adjacency.entry(from.to_string()).or_default();
        targets
            .entry(to.to_string())
            .and_modify(|existing| *existing = existing.merge(relation))
            .or_insert(relation);
    }

    pub fn node(&self, label: &str) -> Option<&Node> {
        self.nodes.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.nodes.contains_key(label)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(IndexMap::len).sum()
    }

    /// Relation of the edge `from → to`, if any.
    pub fn relation(&self, from: &str, to: &str) -> Option<Relation> {
        self.adjacency.get(from)?.get(to).copied()
    }

    /// Outgoing edges of `label` as (target, relation) pairs.
    pub fn targets(&self, label: &str) -> impl Iterator<Item = (&str, Relation)> {
        self.adjacency
            .get(label)
            .into_iter()
            .flat_map(|targets| targets.iter().map(|(to, rel)| (to.as_str(), *rel)))
    }

    pub fn out_degree(&self, label: &str) -> usize {
        self.adjacency.get(label).map_or(0, IndexMap::len)
    }

    /// All edges with resolved endpoints, grouped by source in node order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> {
        self.adjacency.iter().flat_map(move |(from, targets)| {
            targets.iter().filter_map(move |(to, relation)| {
                Some(EdgeRef {
                    from: self.nodes.get(from)?,
                    to: self.nodes.get(to)?,
                    relation: *relation,
                })
            })
        })
    }

    /// Borrowed label adjacency for the analysis algorithms.
    pub fn adjacency(&self) -> Adjacency<'_> {
        self.adjacency
            .iter()
            .map(|(from, targets)| {
                (
                    from.as_str(),
                    targets.keys().map(String::as_str).collect(),
                )
            })
            .collect()
    }
}

/// Wire form of a [`Graph`]: arrays of nodes and edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SerializedGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl From<Graph> for SerializedGraph {
    fn from(graph: Graph) -> Self {
        let edges = graph.edges().map(|edge| edge.to_owned_edge()).collect();
        Self {
            nodes: graph.nodes.into_values().collect(),
            edges,
        }
    }
}

impl TryFrom<SerializedGraph> for Graph {
    type Error = GraphError;

    fn try_from(serialized: SerializedGraph) -> Result<Self> {
        let mut graph = Graph::new();
        for node in serialized.nodes {
            let label = node.label.clone();
            if !graph.add_node(node) {
                return Err(GraphError::DuplicateNode { label });
            }
        }
        for edge in serialized.edges {
            graph.add_edge(&edge.from, &edge.to, edge.relation)?;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::super::node::NodeKind;
    use super::*;

    fn sample() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(Node::new("count", NodeKind::Variable));
        graph.add_node(Node::new("double", NodeKind::Variable));
        graph.add_node(Node::new("increment", NodeKind::Function));
        graph.add_edge("double", "count", Relation::Read).unwrap();
        graph.add_edge("increment", "count", Relation::Write).unwrap();
        graph
    }

    #[test]
    fn test_first_node_wins() {
        let mut graph = Graph::new();
        assert!(graph.add_node(Node::new("a", NodeKind::Variable)));
        assert!(!graph.add_node(Node::new("a", NodeKind::Function)));
        assert_eq!(graph.node("a").unwrap().kind, NodeKind::Variable);
    }

    #[test]
    fn test_edge_to_unknown_node_is_rejected() {
        let mut graph = sample();
        let err = graph.add_edge("double", "props", Relation::Read).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownNode {
                label: "props".to_string()
            }
        );
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_duplicate_edges_keep_strongest_relation() {
        let mut graph = sample();
        graph.add_edge("increment", "count", Relation::Read).unwrap();
        graph.add_edge("double", "count", Relation::Call).unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.relation("increment", "count"), Some(Relation::Write));
        assert_eq!(graph.relation("double", "count"), Some(Relation::Call));
    }

    #[test]
    fn test_every_node_has_an_adjacency_entry() {
        let graph = sample();
        let adjacency = graph.adjacency();

        assert_eq!(adjacency.len(), 3);
        assert!(adjacency["count"].is_empty());
        assert_eq!(graph.out_degree("increment"), 1);
    }

    #[test]
    fn test_serde_roundtrip_preserves_sets() {
        let graph = sample();
        let json = serde_json::to_string(&graph).unwrap();
        let restored: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(graph, restored);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(value["edges"][1]["relation"], "write");
    }

    #[test]
    fn test_deserialize_rejects_duplicate_nodes() {
        let json = r#"{"nodes":[{"label":"a","kind":"variable"},{"label":"a","kind":"function"}],"edges":[]}"#;
        let result: std::result::Result<Graph, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
