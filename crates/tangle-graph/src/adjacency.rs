//! Borrowed label adjacency used by the graph algorithms.
//!
//! The algorithms in [`crate::suggest`] and [`crate::community`] only need
//! labels and successor sets, so they run on this lightweight view instead of
//! the full [`crate::Graph`]. Targets do not have to be keys: a node that is
//! only referenced is treated as having no successors.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap as HashMap;

/// Label → successor labels, in insertion order.
pub type Adjacency<'g> = IndexMap<&'g str, IndexSet<&'g str>>;

/// Count incoming edges for every node that appears as a key or a target.
pub fn in_degrees<'g>(adjacency: &Adjacency<'g>) -> HashMap<&'g str, usize> {
    let mut degrees: HashMap<&'g str, usize> = HashMap::default();
    for (&node, targets) in adjacency {
        degrees.entry(node).or_insert(0);
        for &target in targets {
            *degrees.entry(target).or_insert(0) += 1;
        }
    }
    degrees
}

/// Undirected view: every edge is mirrored, self-loops are dropped, and every
/// node (keys and referenced targets) gets an entry.
pub fn symmetrize<'g>(adjacency: &Adjacency<'g>) -> Adjacency<'g> {
    let mut undirected: Adjacency<'g> = adjacency
        .keys()
        .map(|&node| (node, IndexSet::new()))
        .collect();

    for (&from, targets) in adjacency {
        for &to in targets {
            if from == to {
                continue;
            }
            undirected.entry(from).or_default().insert(to);
            undirected.entry(to).or_default().insert(from);
        }
    }

    undirected
}

/// Successors of `node`, empty when the node is not a key.
pub(crate) fn successors<'a, 'g>(
    adjacency: &'a Adjacency<'g>,
    node: &str,
) -> impl Iterator<Item = &'g str> + 'a {
    adjacency
        .get(node)
        .into_iter()
        .flat_map(|targets| targets.iter().copied())
}

/// Parse `"A:B,D B:D C"` into an adjacency (test fixtures).
#[cfg(test)]
pub(crate) fn parse_adjacency(fixture: &str) -> Adjacency<'_> {
    fixture.split_whitespace()
        .map(|entry| match entry.split_once(':') {
            Some((node, targets)) => (
                node,
                targets.split(',').filter(|t| !t.is_empty()).collect(),
            ),
            None => (entry, IndexSet::new()),
        })
        .collect()
}
