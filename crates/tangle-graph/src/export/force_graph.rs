use serde::{Deserialize, Serialize};

use super::super::UsageSet;
use super::super::community::CommunityResult;
use super::super::graph::Graph;
use super::super::node::NodeKind;

/// Arrow scale used for every edge.
const ARROW_SCALE: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Dot,
    Diamond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeGroup {
    Used,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceNode {
    pub id: String,
    pub label: String,
    pub shape: NodeShape,
    pub group: NodeGroup,
    /// Leading doc comment, shown as a tooltip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowHead {
    pub enabled: bool,
    pub scale_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrows {
    pub to: ArrowHead,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceEdge {
    pub from: String,
    pub to: String,
    pub arrows: Arrows,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceGraph {
    pub nodes: Vec<ForceNode>,
    pub edges: Vec<ForceEdge>,
}

/// Project `graph` into force-graph arrays. Community ids are attached when a
/// clustering is supplied.
pub fn to_force_graph(
    graph: &Graph,
    used: &UsageSet,
    communities: Option<&CommunityResult>,
) -> ForceGraph {
    let nodes = graph
        .nodes()
        .map(|node| ForceNode {
            id: node.label.clone(),
            label: node.label.clone(),
            shape: match node.kind {
                NodeKind::Variable => NodeShape::Dot,
                NodeKind::Function => NodeShape::Diamond,
            },
            group: if used.contains(&node.label) {
                NodeGroup::Used
            } else {
                NodeGroup::Normal
            },
            title: node
                .source_info
                .as_ref()
                .map(|info| info.comment.trim())
                .filter(|comment| !comment.is_empty())
                .map(str::to_string),
            community: communities.and_then(|result| result.community_of(&node.label)),
        })
        .collect();

    let edges = graph
        .edges()
        .map(|edge| ForceEdge {
            from: edge.from.label.clone(),
            to: edge.to.label.clone(),
            arrows: Arrows {
                to: ArrowHead {
                    enabled: true,
                    scale_factor: ARROW_SCALE,
                },
            },
        })
        .collect();

    ForceGraph { nodes, edges }
}
