//! Directed cycle detection.

use rustc_hash::FxHashSet as HashSet;

use super::super::adjacency::Adjacency;

/// Find one directed cycle, returned as the nodes of the DFS stack starting at
/// the node the back edge points to. A self-loop is a one-node cycle.
pub fn find_cycle<'g>(adjacency: &Adjacency<'g>) -> Option<Vec<&'g str>> {
    let mut visited: HashSet<&'g str> = HashSet::default();

    for &root in adjacency.keys() {
        if !visited.insert(root) {
            continue;
        }

        let mut path: Vec<&'g str> = vec![root];
        let mut on_path: HashSet<&'g str> = HashSet::default();
        on_path.insert(root);
        // (node, index of the next successor to try)
        let mut frames: Vec<(&'g str, usize)> = vec![(root, 0)];

        while let Some(frame) = frames.last_mut() {
            let (node, cursor) = *frame;
            frame.1 += 1;
            let next = adjacency
                .get(node)
                .and_then(|targets| targets.get_index(cursor))
                .copied();

            match next {
                Some(target) if on_path.contains(target) => {
                    let start = path.iter().position(|n| *n == target).unwrap_or(0);
                    return Some(path[start..].to_vec());
                }
                Some(target) => {
                    if visited.insert(target) {
                        path.push(target);
                        on_path.insert(target);
                        frames.push((target, 0));
                    }
                }
                None => {
                    frames.pop();
                    if let Some(done) = path.pop() {
                        on_path.remove(done);
                    }
                }
            }
        }
    }

    None
}

/// Whether some node reaches itself through at least one edge.
pub fn has_cycle(adjacency: &Adjacency<'_>) -> bool {
    find_cycle(adjacency).is_some()
}
