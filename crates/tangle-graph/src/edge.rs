//! Directed, typed edges between declarations.

use serde::{Deserialize, Serialize};

use super::node::Node;

/// How the source declaration touches the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// The target is read
    Read,
    /// The target is invoked directly
    Call,
    /// The target (or a member of it) is assigned
    Write,
}

impl Relation {
    /// Rank used when two edges point at the same target: Write > Call > Read.
    pub fn precedence(self) -> u8 {
        match self {
            Relation::Read => 0,
            Relation::Call => 1,
            Relation::Write => 2,
        }
    }

    /// Combine two relations to the same target, keeping the stronger one.
    pub fn merge(self, other: Relation) -> Relation {
        if other.precedence() > self.precedence() {
            other
        } else {
            self
        }
    }
}

/// An owned edge, as serialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub relation: Relation,
}

/// A borrowed edge with both endpoints resolved to nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef<'g> {
    pub from: &'g Node,
    pub to: &'g Node,
    pub relation: Relation,
}

impl EdgeRef<'_> {
    pub fn to_owned_edge(&self) -> Edge {
        Edge {
            from: self.from.label.clone(),
            to: self.to.label.clone(),
            relation: self.relation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_wins_over_read() {
        assert_eq!(Relation::Read.merge(Relation::Write), Relation::Write);
        assert_eq!(Relation::Write.merge(Relation::Read), Relation::Write);
    }

    #[test]
    fn test_call_sits_between_read_and_write() {
        assert_eq!(Relation::Read.merge(Relation::Call), Relation::Call);
        assert_eq!(Relation::Call.merge(Relation::Read), Relation::Call);
        assert_eq!(Relation::Call.merge(Relation::Write), Relation::Write);
        assert_eq!(Relation::Write.merge(Relation::Call), Relation::Write);
    }
}
