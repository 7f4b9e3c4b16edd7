//! # Polysync Graph
//!
//! Neo4j projection layer: the graph client, the match-then-branch
//! [`store::GraphStore`] seam, the idempotent projector and the sync
//! orchestrator that drives a full relational → graph run.

pub mod client;
pub mod error;
pub mod project;
pub mod schema;
pub mod store;
pub mod sync;

pub use client::{GraphClient, GraphConfig};
pub use error::{GraphError, ProjectError, SyncError};
pub use store::GraphStore;
pub use sync::{run_reset, run_sync, SyncPhase};
