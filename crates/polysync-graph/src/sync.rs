//! Sync orchestrator: one full relational → graph run.
//!
//! Reads everything first, then projects nodes, then edges. Per-record
//! failures are recorded and the run continues; losing either store aborts
//! it. Re-running after any outcome is safe and converges on a graph that
//! mirrors the source.

use std::collections::HashSet;
use std::fmt;

use polysync_core::{EdgeIdentity, EntityKind, Friendship, IssueKind, Post, SyncReport, User};
use polysync_db::{queries, SourcePool};
use tracing::{info, warn};

use crate::error::{GraphError, ProjectError, SyncError};
use crate::project::{self, EdgeOutcome, UpsertOutcome};
use crate::store::GraphStore;

/// Phases of a run, in order. `Failed` is reachable from any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    ReadingSource,
    ProjectingNodes,
    ProjectingEdges,
    Completed,
    Failed,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::ReadingSource => "reading-source",
            Self::ProjectingNodes => "projecting-nodes",
            Self::ProjectingEdges => "projecting-edges",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

fn enter(phase: SyncPhase) -> SyncPhase {
    info!(%phase, "Sync phase");
    phase
}

fn issue_kind(err: &GraphError) -> IssueKind {
    match err {
        GraphError::Constraint(_) => IssueKind::DuplicateViolation,
        _ => IssueKind::UpsertFailed,
    }
}

/// Run one full sync. Reads never overlap writes: all three sequences are
/// pulled before the first upsert, so a source failure leaves the graph
/// untouched.
pub async fn run_sync(source: &SourcePool, graph: &dyn GraphStore) -> Result<SyncReport, SyncError> {
    enter(SyncPhase::ReadingSource);

    let (users, posts, friendships) = match read_source(source) {
        Ok(data) => data,
        Err(err) => {
            warn!(phase = %SyncPhase::Failed, error = %err, "Sync run failed");
            return Err(err.into());
        }
    };
    info!(
        users = users.len(),
        posts = posts.len(),
        friendships = friendships.len(),
        "Source read complete"
    );

    let mut report = SyncReport::default();
    let mut failed_persons: HashSet<i64> = HashSet::new();
    let mut failed_posts: HashSet<i64> = HashSet::new();

    // All nodes land before any edge: persons first, then post nodes.
    let phase = enter(SyncPhase::ProjectingNodes);

    for user in &users {
        match project::upsert_person(graph, user).await {
            Ok(UpsertOutcome::Created) => report.nodes_created += 1,
            Ok(UpsertOutcome::Updated) => report.nodes_updated += 1,
            Err(err) if err.is_fatal() => return fail(phase, err),
            Err(err) => {
                failed_persons.insert(user.id);
                report.record(EntityKind::Person, user.id.to_string(), issue_kind(&err), err.to_string());
            }
        }
    }

    for post in &posts {
        match project::upsert_post(graph, post).await {
            Ok(UpsertOutcome::Created) => report.nodes_created += 1,
            Ok(UpsertOutcome::Updated) => report.nodes_updated += 1,
            Err(err) if err.is_fatal() => return fail(phase, err),
            Err(err) => {
                failed_posts.insert(post.id);
                report.record(EntityKind::Post, post.id.to_string(), issue_kind(&err), err.to_string());
            }
        }
    }

    let phase = enter(SyncPhase::ProjectingEdges);

    for post in &posts {
        let identity = EdgeIdentity::authored(post.author_id, post.id);

        // Don't retry edges whose endpoints already failed this run.
        if failed_persons.contains(&post.author_id) || failed_posts.contains(&post.id) {
            report.edges_skipped += 1;
            report.record(
                EntityKind::Authored,
                identity.to_string(),
                IssueKind::DanglingReference,
                "endpoint upsert failed earlier in this run",
            );
            continue;
        }

        match project::upsert_authored_edge(graph, post.author_id, post.id).await {
            Ok(EdgeOutcome::Created) => report.edges_created += 1,
            Ok(EdgeOutcome::Exists) => {}
            Err(err) => record_edge_issue(&mut report, EntityKind::Authored, identity, err, phase)?,
        }
    }

    for friendship in &friendships {
        let identity = EdgeIdentity::friendship(friendship.requester_id, friendship.receiver_id);

        if failed_persons.contains(&friendship.requester_id)
            || failed_persons.contains(&friendship.receiver_id)
        {
            report.edges_skipped += 1;
            report.record(
                EntityKind::FriendOf,
                identity.to_string(),
                IssueKind::DanglingReference,
                "participant upsert failed earlier in this run",
            );
            continue;
        }

        match project::upsert_friend_edge(graph, friendship.requester_id, friendship.receiver_id).await {
            Ok(EdgeOutcome::Created) => report.edges_created += 1,
            Ok(EdgeOutcome::Exists) => {}
            Err(err) => record_edge_issue(&mut report, EntityKind::FriendOf, identity, err, phase)?,
        }
    }

    let phase = enter(SyncPhase::Completed);
    info!(
        %phase,
        nodes_created = report.nodes_created,
        nodes_updated = report.nodes_updated,
        edges_created = report.edges_created,
        edges_skipped = report.edges_skipped,
        issues = report.issues.len(),
        "Sync run complete"
    );

    Ok(report)
}

/// Clear the projected subgraph. The relational store is not touched.
pub async fn run_reset(graph: &dyn GraphStore) -> Result<u64, SyncError> {
    let removed = project::clear_projected_graph(graph)
        .await
        .map_err(SyncError::SinkUnavailable)?;
    info!(removed, "Projected subgraph cleared");
    Ok(removed)
}

fn read_source(
    source: &SourcePool,
) -> Result<(Vec<User>, Vec<Post>, Vec<Friendship>), polysync_db::SourceError> {
    let users = queries::users::list_users(source)?;
    let posts = queries::posts::list_posts(source)?;
    let friendships = queries::friendships::list_accepted(source)?;
    Ok((users, posts, friendships))
}

fn fail(phase: SyncPhase, err: GraphError) -> Result<SyncReport, SyncError> {
    warn!(phase = %SyncPhase::Failed, during = %phase, error = %err, "Sync run failed");
    Err(SyncError::SinkUnavailable(err))
}

/// Record a non-fatal edge problem, or abort if the store itself is gone.
fn record_edge_issue(
    report: &mut SyncReport,
    entity: EntityKind,
    identity: EdgeIdentity,
    err: ProjectError,
    phase: SyncPhase,
) -> Result<(), SyncError> {
    match err {
        ProjectError::DanglingReference { .. } => {
            report.edges_skipped += 1;
            report.record(entity, identity.to_string(), IssueKind::DanglingReference, err.to_string());
            Ok(())
        }
        ProjectError::Store(store_err) if store_err.is_fatal() => {
            warn!(phase = %SyncPhase::Failed, during = %phase, error = %store_err, "Sync run failed");
            Err(SyncError::SinkUnavailable(store_err))
        }
        ProjectError::Store(store_err) => {
            report.edges_skipped += 1;
            report.record(entity, identity.to_string(), issue_kind(&store_err), store_err.to_string());
            Ok(())
        }
    }
}
