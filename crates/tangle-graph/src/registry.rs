//! Idempotent label → node store used while extracting a component.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::node::{Node, NodeKind, SourceInfo};

/// Position and leading comment of a declaration inside its script block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
    /// 1-based line within the parsed block
    pub line: u32,
    /// 0-based column
    pub column: u32,
    pub comment: String,
}

/// A registration that lost against an earlier node with the same label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationConflict {
    pub label: String,
    pub kept: NodeKind,
    pub rejected: NodeKind,
    /// Line of the rejected declaration, when known
    pub rejected_line: Option<u32>,
}

/// Label → node map where the first registration wins.
///
/// Later registrations under a known label are no-ops. When such a
/// registration disagrees with the stored node (different kind or position) it
/// is kept as a [`RegistrationConflict`] so callers can surface redeclarations.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: IndexMap<String, Node>,
    line_offset: u32,
    conflicts: Vec<RegistrationConflict>,
}

impl NodeRegistry {
    /// Create a registry for a block that starts `line_offset` lines into its
    /// enclosing document.
    pub fn new(line_offset: u32) -> Self {
        Self {
            line_offset,
            ..Self::default()
        }
    }

    pub fn line_offset(&self) -> u32 {
        self.line_offset
    }

    /// Register a declaration. Returns `true` if a new node was created.
    pub fn register(
        &mut self,
        label: impl Into<String>,
        kind: NodeKind,
        declaration: Option<Declaration>,
    ) -> bool {
        let mut node = Node::new(label, kind);
        if let Some(decl) = declaration {
            let line = decl.line.saturating_add(self.line_offset).saturating_sub(1);
            node = node.with_info(SourceInfo::new(line, decl.column).with_comment(decl.comment));
        }
        self.register_node(node)
    }

    /// Register an already built node (imported from another registry).
    pub fn register_node(&mut self, node: Node) -> bool {
        match self.nodes.get(&node.label) {
            Some(existing) => {
                let same_position = existing.source_info.as_ref().map(|i| (i.line, i.column))
                    == node.source_info.as_ref().map(|i| (i.line, i.column));
                if existing.kind != node.kind || !same_position {
                    tracing::debug!(
                        label = %node.label,
                        "ignoring redeclaration, first registration wins"
                    );
                    self.conflicts.push(RegistrationConflict {
                        label: node.label.clone(),
                        kept: existing.kind,
                        rejected: node.kind,
                        rejected_line: node.source_info.as_ref().map(|i| i.line),
                    });
                }
                false
            }
            None => {
                self.nodes.insert(node.label.clone(), node);
                true
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&Node> {
        self.nodes.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.nodes.contains_key(label)
    }

    /// Record that `hook` references `label`. Unknown labels are ignored.
    pub fn tag_hook(&mut self, label: &str, hook: &str) -> bool {
        self.nodes
            .get_mut(label)
            .is_some_and(|node| node.tag_hook(hook))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn conflicts(&self) -> &[RegistrationConflict] {
        &self.conflicts
    }

    /// Move conflicts recorded by another registry into this one.
    pub fn absorb_conflicts(&mut self, other: &mut NodeRegistry) {
        self.conflicts.append(&mut other.conflicts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(line: u32, column: u32) -> Option<Declaration> {
        Some(Declaration {
            line,
            column,
            comment: String::new(),
        })
    }

    #[test]
    fn test_line_offset_is_applied() {
        let mut registry = NodeRegistry::new(10);
        registry.register("count", NodeKind::Variable, decl(3, 6));

        let info = registry.get("count").unwrap().source_info.clone().unwrap();
        assert_eq!((info.line, info.column), (12, 6));
    }

    #[test]
    fn test_huge_line_offset_saturates() {
        let mut registry = NodeRegistry::new(u32::MAX);
        registry.register("x", NodeKind::Variable, decl(2, 0));

        let info = registry.get("x").unwrap().source_info.clone().unwrap();
        assert_eq!(info.line, u32::MAX - 1);
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = NodeRegistry::new(0);
        assert!(registry.register("count", NodeKind::Variable, decl(1, 0)));
        assert!(!registry.register("count", NodeKind::Function, decl(7, 2)));

        assert_eq!(registry.get("count").unwrap().kind, NodeKind::Variable);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_conflicting_redeclaration_is_recorded() {
        let mut registry = NodeRegistry::new(0);
        registry.register("count", NodeKind::Variable, decl(1, 0));
        registry.register("count", NodeKind::Function, decl(7, 2));

        assert_eq!(
            registry.conflicts(),
            &[RegistrationConflict {
                label: "count".to_string(),
                kept: NodeKind::Variable,
                rejected: NodeKind::Function,
                rejected_line: Some(6),
            }]
        );
    }

    #[test]
    fn test_reimporting_the_same_node_is_not_a_conflict() {
        let mut registry = NodeRegistry::new(0);
        registry.register("count", NodeKind::Variable, decl(1, 0));
        let node = registry.get("count").unwrap().clone();

        assert!(!registry.register_node(node));
        assert!(registry.conflicts().is_empty());
    }

    #[test]
    fn test_tag_hook_on_unknown_label_is_ignored() {
        let mut registry = NodeRegistry::new(0);
        registry.register("count", NodeKind::Variable, None);

        assert!(registry.tag_hook("count", "mounted"));
        assert!(!registry.tag_hook("missing", "mounted"));
        assert!(registry.get("count").unwrap().has_hook_usage());
    }
}
