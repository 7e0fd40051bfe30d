//! Linear call-chain detection.

use super::super::adjacency::{Adjacency, in_degrees, successors};

/// Maximal branch-free directed paths of at least three nodes.
///
/// A path starts at a node nobody points to that has exactly one successor,
/// and keeps extending while the current node has a single successor whose
/// only incoming edge is the one being followed. Reaching a node already on the
/// path ends it.
pub fn find_linear_paths<'g>(adjacency: &Adjacency<'g>) -> Vec<Vec<&'g str>> {
    let in_degree = in_degrees(adjacency);
    let incoming = |node: &str| in_degree.get(node).copied().unwrap_or(0);

    let mut paths = Vec::new();

    for (&start, targets) in adjacency {
        if incoming(start) != 0 || targets.len() != 1 {
            continue;
        }

        let mut path = vec![start];
        let mut current = start;
        loop {
            let mut next = successors(adjacency, current);
            let (Some(candidate), None) = (next.next(), next.next()) else {
                break;
            };
            if incoming(candidate) != 1 || path.contains(&candidate) {
                break;
            }
            path.push(candidate);
            current = candidate;
        }

        if path.len() >= 3 {
            paths.push(path);
        }
    }

    paths
}
