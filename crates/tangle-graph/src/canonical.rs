//! Raw extractor output → typed [`Graph`].

use indexmap::IndexMap;

use super::edge::Relation;
use super::graph::Graph;
use super::raw::RawGraph;
use super::registry::NodeRegistry;

/// Build the final graph from a raw label graph and the node registry.
///
/// - node set: every declared label that has a registry entry
/// - edges: per source, targets deduped by [`Relation::merge`]; targets that
///   are not nodes of the result are dropped
///
/// Pure: the same inputs always produce equal graphs.
pub fn canonicalize(raw: &RawGraph, registry: &NodeRegistry) -> Graph {
    let mut graph = Graph::new();

    for label in raw.nodes() {
        match registry.get(label) {
            Some(node) => {
                graph.add_node(node.clone());
            }
            None => tracing::trace!(label, "dropping label without registry entry"),
        }
    }

    for (from, edges) in raw.edges() {
        if !graph.contains(from) {
            continue;
        }

        let mut deduped: IndexMap<&str, Relation> = IndexMap::new();
        for edge in edges {
            if !graph.contains(&edge.target) {
                continue;
            }
            deduped
                .entry(edge.target.as_str())
                .and_modify(|rel| *rel = rel.merge(edge.relation))
                .or_insert(edge.relation);
        }

        for (to, relation) in deduped {
            graph.link(from, to, relation);
        }
    }

    graph
}
