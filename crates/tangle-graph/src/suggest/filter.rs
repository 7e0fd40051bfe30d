//! Zero-indegree filter: nodes nothing else in the graph refers to.

use super::super::adjacency::{Adjacency, in_degrees};

/// Keys of `adjacency` that no edge points to, in key order.
pub fn no_indegree_filter<'g>(adjacency: &Adjacency<'g>) -> Vec<&'g str> {
    let in_degree = in_degrees(adjacency);
    adjacency
        .keys()
        .copied()
        .filter(|node| in_degree.get(node).copied().unwrap_or(0) == 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::super::adjacency::parse_adjacency;
    use super::*;

    #[test]
    fn test_edgeless_graph_returns_every_node() {
        let adjacency = parse_adjacency("a b c");
        assert_eq!(no_indegree_filter(&adjacency), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_targets_are_filtered_out() {
        let adjacency = parse_adjacency("a:b b:c c d:d");
        assert_eq!(no_indegree_filter(&adjacency), vec!["a"]);
    }
}
