//! The graph collaborator seam.
//!
//! Upserts are expressed as an explicit match-then-branch over these
//! primitives rather than a single MERGE statement, so the projector's
//! behavior (created vs. updated, dangling detection) is observable and
//! testable independent of Neo4j.

pub mod neo4j;

#[cfg(test)]
pub(crate) mod memory;

use async_trait::async_trait;
use polysync_core::{EdgeIdentity, NodeKind};

use crate::error::GraphError;

/// Mirrored node attributes, keyed by property name.
pub type NodeProps = Vec<(&'static str, String)>;

/// Primitive operations the projection needs from a graph store.
///
/// Every node this interface touches carries the `source_id` marker
/// property; graph content without the marker is invisible to it, including
/// to [`delete_marked`](GraphStore::delete_marked).
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Does a node with this kind and source id exist?
    async fn node_exists(&self, kind: NodeKind, source_id: i64) -> Result<bool, GraphError>;

    /// Create a node. The caller has already established it is absent.
    async fn create_node(
        &self,
        kind: NodeKind,
        source_id: i64,
        props: NodeProps,
    ) -> Result<(), GraphError>;

    /// Update the mirrored attributes of an existing node in place.
    async fn update_node(
        &self,
        kind: NodeKind,
        source_id: i64,
        props: NodeProps,
    ) -> Result<(), GraphError>;

    /// Does an edge with this identity exist?
    async fn edge_exists(&self, edge: EdgeIdentity) -> Result<bool, GraphError>;

    /// Create an edge between two existing nodes.
    async fn create_edge(&self, edge: EdgeIdentity) -> Result<(), GraphError>;

    /// Detach-delete every node carrying the source_id marker, leaving
    /// unrelated graph content untouched. Returns the number of removed nodes.
    async fn delete_marked(&self) -> Result<u64, GraphError>;

    /// Counts of marked nodes and edges between marked nodes, for status.
    async fn marked_counts(&self) -> Result<(u64, u64), GraphError>;
}
