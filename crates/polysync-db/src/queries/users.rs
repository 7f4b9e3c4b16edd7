//! User queries.

use crate::pool::{SourcePool, SourceResult};
use polysync_core::User;

/// List all users, ordered by id for deterministic projection order.
pub fn list_users(pool: &SourcePool) -> SourceResult<Vec<User>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, display_name, email, country FROM users ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(User {
                id: row.get(0)?,
                display_name: row.get(1)?,
                email: row.get(2)?,
                country: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    })
}

/// Count of users, for the status display.
pub fn count_users(pool: &SourcePool) -> SourceResult<i64> {
    pool.with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations;

    #[test]
    fn test_list_users_typed_decoding() {
        let pool = SourcePool::in_memory().unwrap();
        migrations::run_migrations(&pool).unwrap();
        migrations::seed_demo_data(&pool).unwrap();

        let users = list_users(&pool).unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[0].display_name, "Ana García");
        assert_eq!(users[0].country.as_deref(), Some("ES"));
    }

    #[test]
    fn test_missing_table_is_source_error() {
        // No migrations: the relation does not exist.
        let pool = SourcePool::in_memory().unwrap();
        assert!(list_users(&pool).is_err());
    }
}
