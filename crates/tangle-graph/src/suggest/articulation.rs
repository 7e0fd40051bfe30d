//! Cut vertices of an undirected adjacency (Tarjan low-link, iterative).

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use super::super::adjacency::Adjacency;

/// Nodes whose removal disconnects their connected component.
///
/// `undirected` must be symmetric (see [`crate::adjacency::symmetrize`]).
/// Results follow the key order of `undirected`.
pub fn find_articulation_points<'g>(undirected: &Adjacency<'g>) -> Vec<&'g str> {
    let mut discovery: HashMap<&'g str, usize> = HashMap::default();
    let mut low: HashMap<&'g str, usize> = HashMap::default();
    let mut points: HashSet<&'g str> = HashSet::default();
    let mut time = 0;

    for &root in undirected.keys() {
        if discovery.contains_key(root) {
            continue;
        }
        discovery.insert(root, time);
        low.insert(root, time);
        time += 1;

        let mut root_children = 0;
        // (node, parent, index of the next neighbor to try)
        let mut stack: Vec<(&'g str, Option<&'g str>, usize)> = vec![(root, None, 0)];

        while let Some(frame) = stack.last_mut() {
            let (node, parent, cursor) = *frame;
            frame.2 += 1;
            let next = undirected
                .get(node)
                .and_then(|neighbors| neighbors.get_index(cursor))
                .copied();

            match next {
                Some(neighbor) if Some(neighbor) == parent => {}
                Some(neighbor) => match discovery.get(neighbor).copied() {
                    Some(seen) => lower(&mut low, node, seen),
                    None => {
                        discovery.insert(neighbor, time);
                        low.insert(neighbor, time);
                        time += 1;
                        if node == root {
                            root_children += 1;
                        }
                        stack.push((neighbor, Some(node), 0));
                    }
                },
                None => {
                    stack.pop();
                    let Some(parent) = parent else { continue };
                    let node_low = low.get(node).copied().unwrap_or(usize::MAX);
                    lower(&mut low, parent, node_low);
                    let parent_discovery = discovery.get(parent).copied().unwrap_or(0);
                    if parent != root && node_low >= parent_discovery {
                        points.insert(parent);
                    }
                }
            }
        }

        if root_children > 1 {
            points.insert(root);
        }
    }

    undirected
        .keys()
        .copied()
        .filter(|node| points.contains(node))
        .collect()
}

fn lower<'g>(low: &mut HashMap<&'g str, usize>, node: &'g str, value: usize) {
    if let Some(current) = low.get_mut(node) {
        *current = (*current).min(value);
    }
}
