//! Approximate weak-connectivity splitting.

use indexmap::IndexSet;
use rustc_hash::FxHashSet as HashSet;

use super::super::adjacency::{Adjacency, successors};

/// Split a graph into groups of nodes connected through their edges.
///
/// Nodes are visited by descending out-degree. Each visit collects what is
/// reachable through the out-edges of every visited node; groups that share a
/// node are then merged until no two groups intersect. A node already covered
/// by an earlier walk cannot add anything a merge would not, so it is skipped.
///
/// Every returned group is keyed by all of its members, referenced-only
/// targets included (with an empty successor set).
pub fn split_graph<'g>(adjacency: &Adjacency<'g>) -> Vec<Adjacency<'g>> {
    let mut order: Vec<(&'g str, usize)> = adjacency
        .iter()
        .map(|(&node, targets)| (node, targets.len()))
        .collect();
    order.sort_by(|a, b| b.1.cmp(&a.1));

    let mut covered: HashSet<&'g str> = HashSet::default();
    let mut components: Vec<IndexSet<&'g str>> = Vec::new();

    for (node, _) in order {
        if covered.contains(node) {
            continue;
        }
        let component = reachable(adjacency, node);
        covered.extend(component.iter().copied());
        components.push(component);
    }

    merge_overlapping(&mut components);

    components
        .into_iter()
        .map(|component| {
            component
                .into_iter()
                .map(|node| (node, adjacency.get(node).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}

/// Depth-first preorder from `start` over out-edges, with an explicit stack.
fn reachable<'g>(adjacency: &Adjacency<'g>, start: &'g str) -> IndexSet<&'g str> {
    let mut seen = IndexSet::new();
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        if !seen.insert(node) {
            continue;
        }
        let next: Vec<&'g str> = successors(adjacency, node)
            .filter(|target| !seen.contains(target))
            .collect();
        stack.extend(next.into_iter().rev());
    }

    seen
}

/// Merge intersecting sets until a fixpoint is reached.
fn merge_overlapping(components: &mut Vec<IndexSet<&str>>) {
    loop {
        let mut merged = false;
        let mut i = 0;
        while i < components.len() {
            let mut j = i + 1;
            while j < components.len() {
                if components[i].is_disjoint(&components[j]) {
                    j += 1;
                } else {
                    let other = components.remove(j);
                    components[i].extend(other);
                    merged = true;
                }
            }
            i += 1;
        }
        if !merged {
            break;
        }
    }
}
