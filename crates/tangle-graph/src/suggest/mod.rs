//! Refactor suggestions derived from the shape of a component graph.
//!
//! [`suggest`] splits the graph into connected groups and runs, per group:
//!
//! - isolation: a self-contained group that could live in its own file
//! - dead group: nothing in the group is used by the template or a hook
//! - cycle: declarations that call each other in a loop
//! - linear chain: a used declaration reached through a branch-free path
//! - articulation point: a function that holds a large group together
//!
//! followed by a graph-wide pass over declarations nobody references.
//!
//! The individual algorithms work on a borrowed [`Adjacency`] and are exported
//! for callers that want the raw results.

mod articulation;
mod chain;
mod cycle;
mod filter;
mod split;

use serde::{Deserialize, Serialize};

pub use articulation::find_articulation_points;
pub use chain::find_linear_paths;
pub use cycle::{find_cycle, has_cycle};
pub use filter::no_indegree_filter;
pub use split::split_graph;

use super::UsageSet;
use super::adjacency::{Adjacency, symmetrize};
use super::graph::Graph;
use super::node::Node;

/// Labels listed in a message before it is truncated.
const MAX_LISTED_LABELS: usize = 10;

/// Groups smaller than this are not searched for articulation points.
const ARTICULATION_MIN_GROUP: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// What a suggestion is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Subject {
    Node(Node),
    Nodes(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub severity: Severity,
    pub message: String,
    pub subject: Subject,
}

impl Suggestion {
    fn for_nodes(severity: Severity, message: String, nodes: Vec<Node>) -> Self {
        Self {
            severity,
            message,
            subject: Subject::Nodes(nodes),
        }
    }

    fn for_node(severity: Severity, message: String, node: &Node) -> Self {
        Self {
            severity,
            message,
            subject: Subject::Node(node.clone()),
        }
    }
}

/// How a truncated label list ends.
#[derive(Clone, Copy)]
enum Overflow {
    /// `...(<total>)`
    Counted,
    /// `...`
    Plain,
}

fn format_labels<'a>(labels: impl ExactSizeIterator<Item = &'a str>, overflow: Overflow) -> String {
    let total = labels.len();
    let listed: Vec<&str> = labels.take(MAX_LISTED_LABELS).collect();
    let mut out = listed.join(",");
    if total > MAX_LISTED_LABELS {
        match overflow {
            Overflow::Counted => out.push_str(&format!("...({total})")),
            Overflow::Plain => out.push_str("..."),
        }
    }
    out
}

/// Run every analysis on `graph` and collect suggestions in a stable order.
///
/// `used` holds the labels referenced from outside the script.
pub fn suggest(graph: &Graph, used: &UsageSet) -> Vec<Suggestion> {
    let adjacency = graph.adjacency();
    let groups = split_graph(&adjacency);
    let is_used = |label: &str| used.contains(label);
    let nodes_of = |labels: &[&str]| -> Vec<Node> {
        labels
            .iter()
            .filter_map(|label| graph.node(label).cloned())
            .collect()
    };

    let mut suggestions = Vec::new();

    for group in &groups {
        let labels: Vec<&str> = group.keys().copied().collect();

        if groups.len() > 1 && labels.len() > 2 && labels.iter().any(|&l| !is_used(l)) {
            suggestions.push(Suggestion::for_nodes(
                Severity::Info,
                format!(
                    "Nodes [{}] are isolated, perhaps you can refactor them to an isolated file.",
                    format_labels(labels.iter().copied(), Overflow::Counted)
                ),
                nodes_of(&labels),
            ));
        }

        let dead = labels.iter().all(|&label| {
            !is_used(label) && !graph.node(label).is_some_and(Node::has_hook_usage)
        });
        if dead {
            suggestions.push(Suggestion::for_nodes(
                Severity::Info,
                format!(
                    "Nodes [{}] are not used, perhaps you can remove them.",
                    format_labels(labels.iter().copied(), Overflow::Plain)
                ),
                nodes_of(&labels),
            ));
        }

        if let Some(cycle) = find_cycle(group) {
            suggestions.push(Suggestion::for_nodes(
                Severity::Error,
                format!(
                    "There is a loop call in nodes [{}], perhaps you can refactor it.",
                    format_labels(cycle.iter().copied(), Overflow::Plain)
                ),
                nodes_of(&cycle),
            ));
        }

        for path in find_linear_paths(group) {
            if chain_needs_refactor(&path, &is_used) {
                suggestions.push(Suggestion::for_nodes(
                    Severity::Warning,
                    format!(
                        "Nodes [{}] are have function chain calls, perhaps you can refactor it.",
                        format_labels(path.iter().copied(), Overflow::Counted)
                    ),
                    nodes_of(&path),
                ));
            }
        }

        if group.len() >= ARTICULATION_MIN_GROUP {
            suggestions.extend(articulation_suggestions(graph, group));
        }
    }

    for label in no_indegree_filter(&adjacency) {
        let Some(node) = graph.node(label) else {
            continue;
        };
        if !is_used(label) && !node.has_hook_usage() {
            suggestions.push(Suggestion::for_node(
                Severity::Info,
                format!("Node [{label}] is not used, perhaps you can remove it."),
                node,
            ));
        }
    }

    tracing::debug!(
        groups = groups.len(),
        suggestions = suggestions.len(),
        "analyzed component graph"
    );

    suggestions
}

/// A used node sits in front of an unused one along the path.
fn chain_needs_refactor(path: &[&str], is_used: &impl Fn(&str) -> bool) -> bool {
    let first_used = path.iter().position(|&label| is_used(label));
    let last_unused = path.iter().rposition(|&label| !is_used(label));
    matches!((first_used, last_unused), (Some(used), Some(unused)) if used < unused)
}

fn articulation_suggestions(graph: &Graph, group: &Adjacency<'_>) -> Vec<Suggestion> {
    find_articulation_points(&symmetrize(group))
        .into_iter()
        .filter_map(|label| graph.node(label))
        .filter(|node| node.is_function())
        .map(|node| {
            Suggestion::for_node(
                Severity::Info,
                format!(
                    "Node [{}] is an articulation point, perhaps you need to pay special attention to this node.",
                    node.label
                ),
                node,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::node::NodeKind;
    use super::super::{Relation, SourceInfo};
    use super::*;

    fn used(labels: &[&str]) -> UsageSet {
        labels.iter().map(|l| l.to_string()).collect()
    }

    fn graph(nodes: &[(&str, NodeKind)], edges: &[(&str, &str)]) -> Graph {
        let mut graph = Graph::new();
        for (label, kind) in nodes {
            graph.add_node(Node::new(*label, *kind));
        }
        for (from, to) in edges {
            graph.add_edge(from, to, Relation::Read).unwrap();
        }
        graph
    }

    fn messages(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.message.as_str()).collect()
    }

    #[test]
    fn test_unused_function_is_reported() {
        let graph = graph(
            &[("count", NodeKind::Variable), ("increment", NodeKind::Function)],
            &[("increment", "count")],
        );
        let suggestions = suggest(&graph, &used(&["count"]));

        assert_eq!(
            messages(&suggestions),
            vec!["Node [increment] is not used, perhaps you can remove it."]
        );
        assert!(matches!(&suggestions[0].subject, Subject::Node(n) if n.label == "increment"));
    }

    #[test]
    fn test_hook_usage_counts_as_used() {
        let mut graph = Graph::new();
        let mut info = SourceInfo::new(0, 0);
        info.used_by_hook.insert("onMounted".to_string());
        graph.add_node(Node::new("load", NodeKind::Function).with_info(info));

        assert!(suggest(&graph, &UsageSet::new()).is_empty());
    }

    #[test]
    fn test_isolated_and_dead_groups() {
        let graph = graph(
            &[
                ("a", NodeKind::Function),
                ("b", NodeKind::Function),
                ("c", NodeKind::Variable),
                ("shown", NodeKind::Variable),
            ],
            &[("a", "b"), ("b", "c")],
        );
        let suggestions = suggest(&graph, &used(&["shown"]));
        let messages = messages(&suggestions);

        assert!(messages.contains(
            &"Nodes [a,b,c] are isolated, perhaps you can refactor them to an isolated file."
        ));
        assert!(messages.contains(&"Nodes [a,b,c] are not used, perhaps you can remove them."));
        assert!(messages.contains(&"Node [a] is not used, perhaps you can remove it."));
    }

    #[test]
    fn test_single_group_is_never_isolated() {
        let graph = graph(
            &[
                ("a", NodeKind::Function),
                ("b", NodeKind::Function),
                ("c", NodeKind::Variable),
            ],
            &[("a", "b"), ("b", "c")],
        );
        let suggestions = suggest(&graph, &used(&["a"]));

        assert!(
            !messages(&suggestions).iter().any(|m| m.contains("are isolated")),
            "{:?}",
            messages(&suggestions)
        );
    }

    #[test]
    fn test_isolation_needs_more_than_one_group() {
        let graph = graph(
            &[
                ("a", NodeKind::Function),
                ("b", NodeKind::Function),
                ("c", NodeKind::Variable),
                ("other", NodeKind::Variable),
            ],
            &[("a", "b"), ("b", "c")],
        );
        let suggestions = suggest(&graph, &used(&["a"]));

        assert_eq!(
            messages(&suggestions)
                .into_iter()
                .filter(|m| m.contains("are isolated"))
                .collect::<Vec<_>>(),
            vec!["Nodes [a,b,c] are isolated, perhaps you can refactor them to an isolated file."]
        );
    }

    #[test]
    fn test_cycle_is_an_error() {
        let graph = graph(
            &[("ping", NodeKind::Function), ("pong", NodeKind::Function)],
            &[("ping", "pong"), ("pong", "ping")],
        );
        let suggestions = suggest(&graph, &used(&["ping"]));
        let cycle = suggestions
            .iter()
            .find(|s| s.severity == Severity::Error)
            .unwrap();

        assert_eq!(
            cycle.message,
            "There is a loop call in nodes [ping,pong], perhaps you can refactor it."
        );
    }

    #[test]
    fn test_chain_warning_requires_used_head() {
        let nodes = [
            ("submit", NodeKind::Function),
            ("validate", NodeKind::Function),
            ("normalize", NodeKind::Function),
        ];
        let edges = [("submit", "validate"), ("validate", "normalize")];
        let graph = graph(&nodes, &edges);

        let warned = suggest(&graph, &used(&["submit"]));
        assert!(messages(&warned).contains(
            &"Nodes [submit,validate,normalize] are have function chain calls, perhaps you can refactor it."
        ));

        let quiet = suggest(&graph, &used(&["normalize"]));
        assert!(quiet.iter().all(|s| s.severity != Severity::Warning));
    }

    #[test]
    fn test_articulation_point_only_for_functions_in_large_groups() {
        let nodes = [
            ("a", NodeKind::Variable),
            ("b", NodeKind::Variable),
            ("hub", NodeKind::Function),
            ("c", NodeKind::Variable),
            ("d", NodeKind::Variable),
            ("bridge", NodeKind::Variable),
        ];
        let edges = [
            ("hub", "a"),
            ("hub", "b"),
            ("a", "b"),
            ("hub", "bridge"),
            ("bridge", "c"),
            ("c", "d"),
        ];
        let graph = graph(&nodes, &edges);
        let all: Vec<&str> = nodes.iter().map(|(l, _)| *l).collect();
        let suggestions = suggest(&graph, &used(&all));

        assert_eq!(
            messages(&suggestions),
            vec!["Node [hub] is an articulation point, perhaps you need to pay special attention to this node."]
        );
    }

    #[test]
    fn test_label_list_truncation() {
        let labels: Vec<String> = (0..12).map(|i| format!("n{i}")).collect();
        let iter = || labels.iter().map(String::as_str);

        assert_eq!(
            format_labels(iter(), Overflow::Counted),
            "n0,n1,n2,n3,n4,n5,n6,n7,n8,n9...(12)"
        );
        assert_eq!(
            format_labels(iter(), Overflow::Plain),
            "n0,n1,n2,n3,n4,n5,n6,n7,n8,n9..."
        );
        assert_eq!(format_labels(iter().take(2), Overflow::Counted), "n0,n1");
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_value(Severity::Warning).unwrap();
        assert_eq!(json, "warning");
    }
}
