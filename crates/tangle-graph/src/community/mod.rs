//! Label-propagation clustering of a component graph.
//!
//! Edges are treated as undirected. Every node starts in its own community;
//! each pass visits the nodes in a fresh random order and moves a node to the
//! most frequent community among its neighbors. Clustering stops after a pass
//! that changes nothing or after [`CommunityOptions::max_iterations`] passes.
//!
//! The result is deterministic for a given generator: use
//! [`detect_communities_with_rng`] with a seeded [`rand::rngs::StdRng`] for
//! reproducible output.

mod colors;

use indexmap::{IndexMap, IndexSet};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub use colors::{CommunityColor, generate_community_colors, generate_community_colors_rgba};

use super::adjacency::symmetrize;
use super::graph::Graph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommunityOptions {
    /// Upper bound on propagation passes
    pub max_iterations: usize,
}

impl Default for CommunityOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    pub id: usize,
    pub nodes: IndexSet<String>,
}

/// Communities sorted by descending size with ids `0..k`, plus the reverse
/// lookup from node label to community id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityResult {
    pub communities: Vec<Community>,
    pub node_to_community: IndexMap<String, usize>,
}

impl CommunityResult {
    pub fn community_of(&self, label: &str) -> Option<usize> {
        self.node_to_community.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.communities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }
}

/// Cluster `graph` using the thread-local generator.
pub fn detect_communities(graph: &Graph, options: &CommunityOptions) -> CommunityResult {
    detect_communities_with_rng(graph, options, &mut rand::thread_rng())
}

/// Cluster `graph` drawing shuffles and tie-breaks from `rng`.
pub fn detect_communities_with_rng<R: Rng + ?Sized>(
    graph: &Graph,
    options: &CommunityOptions,
    rng: &mut R,
) -> CommunityResult {
    let undirected = symmetrize(&graph.adjacency());

    let mut labels: IndexMap<&str, usize> = undirected
        .keys()
        .enumerate()
        .map(|(index, &node)| (node, index))
        .collect();
    let mut order: Vec<&str> = undirected.keys().copied().collect();

    let mut passes = 0;
    while passes < options.max_iterations {
        passes += 1;
        order.shuffle(rng);
        let mut changed = false;

        for &node in &order {
            let Some(neighbors) = undirected.get(node) else {
                continue;
            };
            if neighbors.is_empty() {
                continue;
            }

            let mut tally: IndexMap<usize, usize> = IndexMap::new();
            for neighbor in neighbors {
                if let Some(&label) = labels.get(neighbor) {
                    *tally.entry(label).or_insert(0) += 1;
                }
            }
            let Some(&best) = tally.values().max() else {
                continue;
            };
            let tied: Vec<usize> = tally
                .iter()
                .filter(|&(_, &count)| count == best)
                .map(|(&label, _)| label)
                .collect();

            let current = labels.get(node).copied();
            if current.is_some_and(|label| tied.contains(&label)) {
                continue;
            }
            if let Some(&picked) = tied.choose(rng) {
                labels.insert(node, picked);
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    tracing::trace!(passes, nodes = labels.len(), "label propagation finished");

    group_by_label(&labels)
}

/// Group nodes by final label, largest group first. Equal sizes are ordered
/// by their smallest label, so ids do not depend on node insertion order.
fn group_by_label(labels: &IndexMap<&str, usize>) -> CommunityResult {
    let mut groups: IndexMap<usize, IndexSet<String>> = IndexMap::new();
    for (&node, &label) in labels {
        groups.entry(label).or_default().insert(node.to_string());
    }

    let mut groups: Vec<IndexSet<String>> = groups.into_values().collect();
    groups.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then_with(|| a.iter().min().cmp(&b.iter().min()))
    });

    let mut result = CommunityResult::default();
    for (id, nodes) in groups.into_iter().enumerate() {
        for node in &nodes {
            result.node_to_community.insert(node.clone(), id);
        }
        result.communities.push(Community { id, nodes });
    }
    result
}
