use indexmap::IndexMap;
use tangle_graph::{
    Declaration, Graph, Node, NodeKind, NodeRegistry, RawGraph, RegistrationConflict, Relation,
    canonicalize,
};

/// Label graph plus node registry for one scope under analysis.
#[derive(Debug, Clone, Default)]
pub(crate) struct GraphBuilder {
    pub raw: RawGraph,
    pub registry: NodeRegistry,
}

impl GraphBuilder {
    pub(crate) fn new(line_offset: u32) -> Self {
        Self {
            raw: RawGraph::new(),
            registry: NodeRegistry::new(line_offset),
        }
    }

    pub(crate) fn declare(&mut self, label: &str, kind: NodeKind, declaration: Declaration) {
        self.raw.add_node(label);
        self.registry.register(label, kind, Some(declaration));
    }

    /// Add an already built node (imported from a nested scope).
    pub(crate) fn declare_node(&mut self, node: Node) {
        self.raw.add_node(node.label.as_str());
        self.registry.register_node(node);
    }

    pub(crate) fn is_declared(&self, label: &str) -> bool {
        self.registry.contains(label)
    }

    /// Edges from `from` to every referenced label that is a declared node.
    pub(crate) fn link(&mut self, from: &str, references: &IndexMap<String, Relation>) {
        for (to, relation) in references {
            if self.registry.contains(to) {
                self.raw.add_edge(from, to.as_str(), *relation);
            }
        }
    }

    pub(crate) fn link_one(&mut self, from: &str, to: &str, relation: Relation) {
        if self.registry.contains(to) {
            self.raw.add_edge(from, to, relation);
        }
    }

    /// Tag every declared label in `references` as used by `hook`.
    pub(crate) fn tag(&mut self, hook: &str, references: impl IntoIterator<Item = impl AsRef<str>>) {
        for label in references {
            self.registry.tag_hook(label.as_ref(), hook);
        }
    }

    /// Take over every node and edge of `other`, conflicts included.
    pub(crate) fn merge(&mut self, mut other: GraphBuilder) {
        self.raw.extend(&other.raw);
        for node in other.registry.nodes() {
            self.registry.register_node(node.clone());
        }
        self.registry.absorb_conflicts(&mut other.registry);
    }

    pub(crate) fn finish(self) -> (Graph, Vec<RegistrationConflict>) {
        let graph = canonicalize(&self.raw, &self.registry);
        (graph, self.registry.conflicts().to_vec())
    }
}
