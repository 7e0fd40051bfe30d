//! Graph nodes: one per declaration of the analyzed component.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Classification of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Plain binding, reactive state, computed value, data field
    Variable,
    /// Function declaration, arrow/function initializer, method
    Function,
}

/// Where a declaration lives and who else touches it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    /// 0-based line in the enclosing document
    pub line: u32,
    /// 0-based column
    pub column: u32,
    /// Leading comment text with delimiters stripped
    #[serde(default)]
    pub comment: String,
    /// Lifecycle hooks / watchers that read this declaration
    #[serde(default)]
    pub used_by_hook: IndexSet<String>,
}

impl SourceInfo {
    /// Create source info for a position without comment or hook usage.
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            line,
            column,
            ..Self::default()
        }
    }

    /// Attach a leading comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// A declaration inside the analyzed component.
///
/// The label is the node's identity; it is unique within a graph. Only the
/// hook usage set changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub label: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_info: Option<SourceInfo>,
}

impl Node {
    /// Create a node without source information.
    pub fn new(label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            label: label.into(),
            kind,
            source_info: None,
        }
    }

    /// Attach source information.
    pub fn with_info(mut self, info: SourceInfo) -> Self {
        self.source_info = Some(info);
        self
    }

    /// Same declaration under another label (aliased setup returns).
    pub fn renamed(&self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: self.kind,
            source_info: self.source_info.clone(),
        }
    }

    pub fn is_function(&self) -> bool {
        self.kind == NodeKind::Function
    }

    /// Hooks that reference this node, in tagging order.
    pub fn hooks(&self) -> impl Iterator<Item = &str> {
        self.source_info
            .iter()
            .flat_map(|info| info.used_by_hook.iter().map(String::as_str))
    }

    /// Whether any lifecycle hook or watcher references this node.
    pub fn has_hook_usage(&self) -> bool {
        self.source_info
            .as_ref()
            .is_some_and(|info| !info.used_by_hook.is_empty())
    }

    /// Record hook usage. Returns `true` if the hook was not already recorded.
    pub(crate) fn tag_hook(&mut self, hook: &str) -> bool {
        self.source_info
            .get_or_insert_with(SourceInfo::default)
            .used_by_hook
            .insert(hook.to_string())
    }
}
