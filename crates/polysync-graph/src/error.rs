//! Error taxonomy for the graph side of a sync run.
//!
//! Fatality is the load-bearing distinction: a lost graph connection aborts
//! the run, while a single failed upsert is recorded in the report and the
//! run continues. Re-running after either is always safe.

use polysync_core::NodeKind;
use thiserror::Error;

/// Errors from the graph store itself.
#[derive(Error, Debug)]
pub enum GraphError {
    /// The store is unreachable or the connection was lost. Fatal.
    #[error("graph store unavailable: {0}")]
    Unavailable(String),

    /// The store reported a uniqueness conflict despite match-then-branch
    /// semantics; indicates an identity-mapping bug. Recorded, not fatal.
    #[error("uniqueness constraint violated: {0}")]
    Constraint(String),

    /// Any other failed statement. Recorded, not fatal.
    #[error("graph query failed: {0}")]
    Query(String),
}

impl GraphError {
    /// Whether this error must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Errors from a single projector operation.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// An edge upsert found one of its endpoint nodes missing. The edge is
    /// skipped and recorded; it is never written against a missing node.
    #[error("dangling reference: no {endpoint} node with source_id {source_id}")]
    DanglingReference { endpoint: NodeKind, source_id: i64 },

    #[error(transparent)]
    Store(#[from] GraphError),
}

/// Terminal status of a failed run.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The relational source could not be read. Nothing was written.
    #[error("relational source unavailable: {0}")]
    SourceUnavailable(#[from] polysync_db::SourceError),

    /// The graph store became unreachable mid-run.
    #[error("graph sink unavailable: {0}")]
    SinkUnavailable(#[source] GraphError),
}
