//! SQLite connection pool.

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors from the relational store.
///
/// Any of these is fatal for a sync run: the source is the precondition for
/// everything else, so failures here are surfaced, never retried internally.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to open relational store: {0}")]
    Open(rusqlite::Error),

    #[error("relational query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("migration failed: {0}")]
    Migration(String),
}

/// Result type for relational operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Shared handle to one SQLite connection.
///
/// A single run executes sequentially, so one connection behind a mutex is
/// enough; the pool exists to give every query the same scoped-access shape.
#[derive(Clone)]
pub struct SourcePool {
    conn: Arc<Mutex<Connection>>,
}

impl SourcePool {
    /// Open (creating if needed) a database file.
    pub fn open(path: impl AsRef<Path>) -> SourceResult<Self> {
        let conn = Connection::open(path).map_err(SourceError::Open)?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(SourceError::Open)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database, used by tests and dry runs.
    pub fn in_memory() -> SourceResult<Self> {
        let conn = Connection::open_in_memory().map_err(SourceError::Open)?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(SourceError::Open)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure with shared access to the connection.
    pub fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, SourceError>,
    ) -> SourceResult<T> {
        let conn = self.conn.lock().expect("source connection lock poisoned");
        f(&conn)
    }

    /// Run a closure with exclusive access, for migrations.
    pub fn with_conn_mut<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> Result<T, SourceError>,
    ) -> SourceResult<T> {
        let mut conn = self.conn.lock().expect("source connection lock poisoned");
        f(&mut conn)
    }
}
