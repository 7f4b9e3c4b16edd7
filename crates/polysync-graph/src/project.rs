//! Idempotent projection operations.
//!
//! Each operation is match-then-branch over the [`GraphStore`] seam: running
//! it twice with the same arguments leaves the graph exactly as one run
//! would. Edge operations verify both endpoints first and refuse to write
//! against a missing node.

use polysync_core::{EdgeIdentity, NodeKind, Post, User};
use tracing::debug;

use crate::error::{GraphError, ProjectError};
use crate::store::GraphStore;

/// How a node upsert resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// How an edge upsert resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOutcome {
    Created,
    Exists,
}

/// Create or update the Person node mirroring a user.
pub async fn upsert_person(
    store: &dyn GraphStore,
    user: &User,
) -> Result<UpsertOutcome, GraphError> {
    let props = vec![
        ("display_name", user.display_name.clone()),
        ("email", user.email.clone()),
    ];

    let outcome = if store.node_exists(NodeKind::Person, user.id).await? {
        store.update_node(NodeKind::Person, user.id, props).await?;
        UpsertOutcome::Updated
    } else {
        store.create_node(NodeKind::Person, user.id, props).await?;
        UpsertOutcome::Created
    };

    debug!(source_id = user.id, ?outcome, "Upserted person");
    Ok(outcome)
}

/// Create or update the Post node mirroring a post. The AUTHORED edge is
/// projected separately, after all nodes are in place.
pub async fn upsert_post(store: &dyn GraphStore, post: &Post) -> Result<UpsertOutcome, GraphError> {
    let props = vec![("content", post.content.clone())];

    let outcome = if store.node_exists(NodeKind::Post, post.id).await? {
        store.update_node(NodeKind::Post, post.id, props).await?;
        UpsertOutcome::Updated
    } else {
        store.create_node(NodeKind::Post, post.id, props).await?;
        UpsertOutcome::Created
    };

    debug!(source_id = post.id, ?outcome, "Upserted post");
    Ok(outcome)
}

/// Ensure exactly one AUTHORED edge from the author to the post.
pub async fn upsert_authored_edge(
    store: &dyn GraphStore,
    author_id: i64,
    post_id: i64,
) -> Result<EdgeOutcome, ProjectError> {
    upsert_edge(store, EdgeIdentity::authored(author_id, post_id)).await
}

/// Ensure exactly one FRIEND_OF edge for the unordered pair, regardless of
/// which user originally sent the request.
pub async fn upsert_friend_edge(
    store: &dyn GraphStore,
    id_a: i64,
    id_b: i64,
) -> Result<EdgeOutcome, ProjectError> {
    upsert_edge(store, EdgeIdentity::friendship(id_a, id_b)).await
}

async fn upsert_edge(
    store: &dyn GraphStore,
    edge: EdgeIdentity,
) -> Result<EdgeOutcome, ProjectError> {
    let (from_kind, from_id, to_kind, to_id) = edge.endpoints();

    if !store.node_exists(from_kind, from_id).await? {
        return Err(ProjectError::DanglingReference {
            endpoint: from_kind,
            source_id: from_id,
        });
    }
    if !store.node_exists(to_kind, to_id).await? {
        return Err(ProjectError::DanglingReference {
            endpoint: to_kind,
            source_id: to_id,
        });
    }

    if store.edge_exists(edge).await? {
        return Ok(EdgeOutcome::Exists);
    }
    store.create_edge(edge).await?;
    debug!(edge = %edge, rel = edge.rel_type(), "Created edge");
    Ok(EdgeOutcome::Created)
}

/// Delete every node this system owns (marked with source_id), detaching
/// their edges; unrelated graph content is untouched. Used for explicit
/// reset only, never during normal sync.
pub async fn clear_projected_graph(store: &dyn GraphStore) -> Result<u64, GraphError> {
    let removed = store.delete_marked().await?;
    debug!(removed, "Cleared projected subgraph");
    Ok(removed)
}
