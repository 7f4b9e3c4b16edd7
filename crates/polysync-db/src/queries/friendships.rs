//! Friendship queries.

use crate::pool::{SourcePool, SourceResult};
use polysync_core::{Friendship, FriendshipState};

/// List accepted friendships only; pending requests never reach the graph.
pub fn list_accepted(pool: &SourcePool) -> SourceResult<Vec<Friendship>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, requester_id, receiver_id, state
             FROM friendships WHERE state = 'ACCEPTED' ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            let state: String = row.get(3)?;
            Ok(Friendship {
                id: row.get(0)?,
                requester_id: row.get(1)?,
                receiver_id: row.get(2)?,
                state: FriendshipState::from_str(&state),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    })
}

/// Count of accepted friendships, for the status display.
pub fn count_accepted(pool: &SourcePool) -> SourceResult<i64> {
    pool.with_conn(|conn| {
        Ok(conn.query_row(
            "SELECT COUNT(*) FROM friendships WHERE state = 'ACCEPTED'",
            [],
            |r| r.get(0),
        )?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations;

    #[test]
    fn test_pending_requests_are_filtered_out() {
        let pool = SourcePool::in_memory().unwrap();
        migrations::run_migrations(&pool).unwrap();
        migrations::seed_demo_data(&pool).unwrap();

        // Seed has two ACCEPTED rows and one PENDING.
        let accepted = list_accepted(&pool).unwrap();
        assert_eq!(accepted.len(), 2);
        assert!(accepted.iter().all(|f| f.state == FriendshipState::Accepted));
    }
}
