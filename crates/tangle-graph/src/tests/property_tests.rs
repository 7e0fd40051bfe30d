//! Property-based tests for tangle-graph using proptest.
//!
//! Random small graphs are checked against the structural guarantees the
//! analyses rely on: partitioning, determinism, and consistency between the
//! community lookup tables.
//!
//! Run with: cargo test --features proptest --package tangle-graph property_tests

#![cfg(feature = "proptest")]

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::suggest::{find_cycle, has_cycle, split_graph};
use crate::{
    CommunityOptions, Graph, Node, NodeKind, NodeRegistry, RawGraph, Relation,
    canonicalize, detect_communities_with_rng, generate_community_colors,
};

/// Strategy for graphs of 1-12 nodes with arbitrary edges between them.
fn graph_strategy() -> impl Strategy<Value = Graph> {
    (1usize..=12).prop_flat_map(|size| {
        (
            prop::collection::vec(prop::bool::ANY, size),
            prop::collection::vec((0..size, 0..size, 0u8..3), 0..=size * 2),
        )
            .prop_map(move |(kinds, edges)| {
                let mut graph = Graph::new();
                for (index, is_function) in kinds.into_iter().enumerate() {
                    let kind = if is_function {
                        NodeKind::Function
                    } else {
                        NodeKind::Variable
                    };
                    graph.add_node(Node::new(format!("n{index}"), kind));
                }
                for (from, to, relation) in edges {
                    let relation = match relation {
                        0 => Relation::Read,
                        1 => Relation::Call,
                        _ => Relation::Write,
                    };
                    graph
                        .add_edge(&format!("n{from}"), &format!("n{to}"), relation)
                        .unwrap();
                }
                graph
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: split groups are disjoint and cover every node.
    #[test]
    fn prop_split_is_a_partition(graph in graph_strategy()) {
        let adjacency = graph.adjacency();
        let groups = split_graph(&adjacency);

        let mut seen = std::collections::HashSet::new();
        for group in &groups {
            for label in group.keys() {
                prop_assert!(seen.insert(*label), "{label} appears in two groups");
            }
        }
        prop_assert_eq!(seen.len(), graph.len());
    }

    /// Property: a reported cycle is a real closed walk.
    #[test]
    fn prop_reported_cycle_is_closed(graph in graph_strategy()) {
        let adjacency = graph.adjacency();
        if let Some(cycle) = find_cycle(&adjacency) {
            prop_assert!(!cycle.is_empty());
            for pair in cycle.windows(2) {
                prop_assert!(graph.relation(pair[0], pair[1]).is_some());
            }
            let first = cycle[0];
            let last = cycle[cycle.len() - 1];
            prop_assert!(graph.relation(last, first).is_some());
        } else {
            for (from, targets) in &adjacency {
                prop_assert!(!targets.contains(from));
            }
        }
        prop_assert_eq!(has_cycle(&adjacency), find_cycle(&adjacency).is_some());
    }

    /// Property: communities partition the node set, ids are 0..k and sizes
    /// never increase.
    #[test]
    fn prop_communities_are_consistent(graph in graph_strategy(), seed in any::<u64>()) {
        let result = detect_communities_with_rng(
            &graph,
            &CommunityOptions::default(),
            &mut StdRng::seed_from_u64(seed),
        );

        let total: usize = result.communities.iter().map(|c| c.nodes.len()).sum();
        prop_assert_eq!(total, graph.len());
        prop_assert_eq!(result.node_to_community.len(), graph.len());

        for (index, community) in result.communities.iter().enumerate() {
            prop_assert_eq!(community.id, index);
            if index > 0 {
                prop_assert!(result.communities[index - 1].nodes.len() >= community.nodes.len());
            }
            for label in &community.nodes {
                prop_assert_eq!(result.community_of(label), Some(index));
            }
        }
    }

    /// Property: canonicalizing the same raw graph twice gives equal graphs.
    #[test]
    fn prop_canonicalize_is_deterministic(
        labels in prop::collection::vec("[a-z]{1,6}", 1..=8),
        edges in prop::collection::vec((0usize..8, 0usize..8), 0..=16),
    ) {
        let mut raw = RawGraph::new();
        let mut registry = NodeRegistry::new(0);
        for (index, label) in labels.iter().enumerate() {
            raw.add_node(label.as_str());
            if index % 3 != 2 {
                registry.register(label.as_str(), NodeKind::Variable, None);
            }
        }
        for (from, to) in edges {
            if let (Some(from), Some(to)) = (labels.get(from), labels.get(to)) {
                raw.add_edge(from, to.as_str(), Relation::Read);
            }
        }

        let first = canonicalize(&raw, &registry);
        prop_assert_eq!(&first, &canonicalize(&raw, &registry));
        for edge in first.edges() {
            prop_assert!(registry.contains(&edge.to.label));
        }
    }

    /// Property: colors are distinct for small community counts.
    #[test]
    fn prop_colors_distinct(count in 0usize..=10) {
        let colors = generate_community_colors(count);
        let unique: std::collections::HashSet<&String> = colors.iter().collect();
        prop_assert_eq!(unique.len(), count);
    }
}
