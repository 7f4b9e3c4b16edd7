//! # Polysync Core
//!
//! Shared domain layer for the polyglot persistence sync: typed relational
//! records, the deterministic identity mapping into the graph, and the
//! migration report returned to callers.
//!
//! This crate performs no I/O. The relational side lives in `polysync-db`,
//! the graph side in `polysync-graph`.

pub mod identity;
pub mod model;
pub mod report;

pub use identity::{canonical_pair, EdgeIdentity, NodeKind};
pub use model::{Friendship, FriendshipState, Post, User};
pub use report::{EntityKind, IssueKind, SyncIssue, SyncReport};
