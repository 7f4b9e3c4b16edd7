//! # Polysync DB
//!
//! Relational layer over SQLite: connection pool, schema migration, seed data
//! and the read-only source queries used by the sync pipeline.
//!
//! The sync core treats this store as the source of truth and never writes
//! to it; the only mutating entry points are [`migrations::run_migrations`]
//! and [`migrations::seed_demo_data`], both invoked from the CLI `init`
//! command.

pub mod migrations;
pub mod pool;
pub mod queries;

pub use pool::{SourceError, SourcePool, SourceResult};
