//! Deterministic mapping from relational primary keys to graph identities.
//!
//! Every graph write is keyed by these identities, which is what makes the
//! whole projection re-runnable: the same source row always maps to the same
//! node or edge, forever.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node labels owned by the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Person,
    Post,
}

impl NodeKind {
    /// Neo4j label for this kind of node.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Post => "Post",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical ordering of two participant ids.
///
/// A friendship row in either direction maps to the same unordered pair, so
/// "Ana requested Carlos" and a re-sent reversed row collapse to one edge.
pub fn canonical_pair(a: i64, b: i64) -> (i64, i64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Identity of a projected relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeIdentity {
    /// Person → Post authorship, keyed by both endpoint source ids.
    Authored { author: i64, post: i64 },
    /// Person ↔ Person friendship, keyed by the canonical pair.
    FriendOf { lo: i64, hi: i64 },
}

impl EdgeIdentity {
    pub fn authored(author: i64, post: i64) -> Self {
        Self::Authored { author, post }
    }

    /// Friendship identity; direction of the original request is irrelevant.
    pub fn friendship(a: i64, b: i64) -> Self {
        let (lo, hi) = canonical_pair(a, b);
        Self::FriendOf { lo, hi }
    }

    /// Relationship type written to the graph.
    pub fn rel_type(&self) -> &'static str {
        match self {
            Self::Authored { .. } => "AUTHORED",
            Self::FriendOf { .. } => "FRIEND_OF",
        }
    }

    /// Endpoint identities in write order: (from kind, from id, to kind, to id).
    pub fn endpoints(&self) -> (NodeKind, i64, NodeKind, i64) {
        match *self {
            Self::Authored { author, post } => (NodeKind::Person, author, NodeKind::Post, post),
            Self::FriendOf { lo, hi } => (NodeKind::Person, lo, NodeKind::Person, hi),
        }
    }
}

impl fmt::Display for EdgeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authored { author, post } => write!(f, "{}->{}", author, post),
            Self::FriendOf { lo, hi } => write!(f, "{{{},{}}}", lo, hi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_pair_orders_ascending() {
        assert_eq!(canonical_pair(3, 7), (3, 7));
        assert_eq!(canonical_pair(7, 3), (3, 7));
        assert_eq!(canonical_pair(5, 5), (5, 5));
    }

    #[test]
    fn test_friendship_identity_is_direction_independent() {
        assert_eq!(EdgeIdentity::friendship(3, 7), EdgeIdentity::friendship(7, 3));
    }

    #[test]
    fn test_authored_identity_is_directional() {
        assert_ne!(
            EdgeIdentity::authored(1, 10),
            EdgeIdentity::authored(10, 1)
        );
    }

    #[test]
    fn test_identity_is_stable() {
        // Same source ids must always produce the same identity.
        let a = EdgeIdentity::friendship(42, 7);
        let b = EdgeIdentity::friendship(42, 7);
        assert_eq!(a, b);
        assert_eq!(a.rel_type(), "FRIEND_OF");
        assert_eq!(a.endpoints(), (NodeKind::Person, 7, NodeKind::Person, 42));
    }
}
