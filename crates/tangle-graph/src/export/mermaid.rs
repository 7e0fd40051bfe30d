use std::fmt::Write as _;

use super::super::UsageSet;
use super::super::graph::Graph;
use super::super::node::{Node, NodeKind};

/// Style of the `used` class.
const USED_STYLE: &str = "fill:#dcfce7,stroke:#16a34a";

/// Render `graph` as a left-to-right Mermaid flowchart.
///
/// Variables are drawn rounded, functions as boxes; a `*` after the label
/// marks a node that nothing outside the script uses. Used nodes get the
/// `used` highlight class.
pub fn to_mermaid(graph: &Graph, used: &UsageSet) -> String {
    let mut out = String::from("flowchart LR");

    for node in graph.nodes() {
        let _ = write!(out, "\n  {}", node_shape(node, used.contains(&node.label)));
    }

    let highlighted: Vec<&str> = graph
        .nodes()
        .filter(|node| used.contains(&node.label))
        .map(|node| node.label.as_str())
        .collect();
    if !highlighted.is_empty() {
        let _ = write!(out, "\n  classDef used {USED_STYLE}");
        let _ = write!(out, "\n  class {} used", highlighted.join(","));
    }
    for edge in graph.edges() {
        let _ = write!(out, "\n  {} --> {}", edge.from.label, edge.to.label);
    }

    out
}

fn node_shape(node: &Node, used: bool) -> String {
    let marker = if used { "" } else { "*" };
    let label = &node.label;
    match node.kind {
        NodeKind::Variable => format!("{label}({label}{marker})"),
        NodeKind::Function => format!("{label}[{label}{marker}]"),
    }
}
