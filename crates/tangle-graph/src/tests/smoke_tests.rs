//! Smoke tests for tangle-graph.
//!
//! Fast, deterministic checks of the end-to-end pipeline: raw extractor
//! output through canonicalization into suggestions, communities and exports.
//!
//! For randomized invariants, see property_tests.rs (requires proptest feature).

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::adjacency::symmetrize;
use crate::suggest::{has_cycle, no_indegree_filter, split_graph};
use crate::{
    CommunityOptions, Declaration, Graph, NodeKind, NodeRegistry, RawGraph, Relation, Severity,
    Subject, UsageSet, canonicalize, detect_communities_with_rng, suggest, to_force_graph,
    to_mermaid,
};

/// A small composition-style component: a counter with a derived value, a
/// logger wired to a hook, and a forgotten helper.
fn counter_component() -> (Graph, UsageSet) {
    let mut raw = RawGraph::new();
    let mut registry = NodeRegistry::new(0);

    let declarations = [
        ("count", NodeKind::Variable, 2),
        ("double", NodeKind::Variable, 3),
        ("increment", NodeKind::Function, 4),
        ("log", NodeKind::Function, 7),
        ("unusedHelper", NodeKind::Function, 9),
    ];
    for (label, kind, line) in declarations {
        raw.add_node(label);
        registry.register(
            label,
            kind,
            Some(Declaration {
                line,
                column: 6,
                comment: String::new(),
            }),
        );
    }
    registry.tag_hook("log", "onMounted");

    raw.add_edge("double", "count", Relation::Read);
    raw.add_edge("increment", "count", Relation::Write);
    raw.add_edge("log", "double", Relation::Read);
    raw.add_edge("unusedHelper", "ref", Relation::Call);

    let used: UsageSet = ["count", "double", "increment"]
        .into_iter()
        .map(String::from)
        .collect();
    (canonicalize(&raw, &registry), used)
}

#[test]
fn test_pipeline_counter_component() {
    let (graph, used) = counter_component();

    assert_eq!(graph.len(), 5);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.node("count").unwrap().source_info.as_ref().unwrap().line, 1);

    let suggestions = suggest(&graph, &used);
    let unused: Vec<&str> = suggestions
        .iter()
        .filter_map(|s| match &s.subject {
            Subject::Node(node) if s.severity == Severity::Info => Some(node.label.as_str()),
            _ => None,
        })
        .collect();
    assert!(unused.contains(&"unusedHelper"));
    assert!(!unused.contains(&"log"), "hook usage keeps log alive");
}

#[test]
fn test_graph_invariants_hold_after_canonicalize() {
    let (graph, _) = counter_component();

    for edge in graph.edges() {
        assert!(graph.contains(&edge.to.label));
        assert!(graph.contains(&edge.from.label));
    }
    assert_eq!(graph.adjacency().len(), graph.len());
    assert!(!has_cycle(&graph.adjacency()));
}

#[test]
fn test_split_partitions_node_set() {
    let (graph, _) = counter_component();
    let adjacency = graph.adjacency();
    let groups = split_graph(&adjacency);

    let total: usize = groups.iter().map(|g| g.len()).sum();
    assert_eq!(total, graph.len());
    for (i, a) in groups.iter().enumerate() {
        for b in &groups[i + 1..] {
            assert!(a.keys().all(|k| !b.contains_key(k)));
        }
    }
}

#[test]
fn test_edgeless_graph_filters_every_node() {
    let mut graph = Graph::new();
    for label in ["a", "b", "c"] {
        graph.add_node(crate::Node::new(label, NodeKind::Variable));
    }
    assert_eq!(no_indegree_filter(&graph.adjacency()).len(), 3);
    assert_eq!(symmetrize(&graph.adjacency()).len(), 3);
}

#[test]
fn test_exports_cover_every_node() {
    let (graph, used) = counter_component();
    let communities = detect_communities_with_rng(
        &graph,
        &CommunityOptions::default(),
        &mut StdRng::seed_from_u64(11),
    );

    let mermaid = to_mermaid(&graph, &used);
    for label in graph.labels() {
        assert!(mermaid.contains(label));
    }

    let projection = to_force_graph(&graph, &used, Some(&communities));
    assert_eq!(projection.nodes.len(), graph.len());
    assert_eq!(projection.edges.len(), graph.edge_count());
    assert!(projection.nodes.iter().all(|n| n.community.is_some()));
}
