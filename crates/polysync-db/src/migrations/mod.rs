//! Relational schema bootstrap and demo seed data.

use crate::pool::{SourceError, SourcePool, SourceResult};
use rusqlite_migration::{Migrations, M};
use tracing::info;

/// SQL schema definition.
const SCHEMA: &str = include_str!("schema.sql");

/// Bring the database up to the latest schema. Safe to run repeatedly.
pub fn run_migrations(pool: &SourcePool) -> SourceResult<()> {
    let migrations = Migrations::new(vec![M::up(SCHEMA)]);

    pool.with_conn_mut(|conn| {
        migrations
            .to_latest(conn)
            .map_err(|e| SourceError::Migration(e.to_string()))
    })
}

/// Insert a small demo dataset: three users, two accepted friendships, one
/// pending request and a couple of posts. Existing rows are left alone.
pub fn seed_demo_data(pool: &SourcePool) -> SourceResult<()> {
    pool.with_conn(|conn| {
        conn.execute_batch(
            "INSERT OR IGNORE INTO users (id, display_name, email, country) VALUES
                 (1, 'Ana García', 'ana@example.com', 'ES'),
                 (2, 'Carlos Ruiz', 'carlos@example.com', 'MX'),
                 (3, 'Lucía Torres', 'lucia@example.com', 'AR');
             INSERT OR IGNORE INTO friendships (id, requester_id, receiver_id, state) VALUES
                 (1, 1, 2, 'ACCEPTED'),
                 (2, 2, 3, 'ACCEPTED'),
                 (3, 3, 1, 'PENDING');
             INSERT OR IGNORE INTO posts (id, content, author_id) VALUES
                 (10, 'Hola a todos, primer post!', 1),
                 (11, 'Aprendiendo bases de datos de grafos', 2);",
        )?;
        Ok(())
    })?;

    info!("Demo data seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations() {
        let pool = SourcePool::in_memory().unwrap();
        run_migrations(&pool).unwrap();

        pool.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table'
                 AND name IN ('users', 'posts', 'friendships')",
                [],
                |row| row.get(0),
            )?;
            assert_eq!(count, 3);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_migrations_are_rerunnable() {
        let pool = SourcePool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        run_migrations(&pool).unwrap();
    }

    #[test]
    fn test_seed_is_idempotent() {
        let pool = SourcePool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        seed_demo_data(&pool).unwrap();
        seed_demo_data(&pool).unwrap();

        pool.with_conn(|conn| {
            let users: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
            assert_eq!(users, 3);
            Ok(())
        })
        .unwrap();
    }
}
